//! Task result documents returned after a task completes.

pub mod annealing;
pub mod dwave;
pub mod gate_model;
pub mod metadata;

pub use annealing::{AnnealingTaskResult, Solution};
pub use dwave::{DwaveMetadata, DwaveTiming};
pub use gate_model::{GateModelTaskResult, MeasurementCounts, MeasurementRow, ResultTypeValue};
pub use metadata::{ActionPayload, AdditionalMetadata, TaskMetadata};

use crate::error::SchemaResult;
use crate::registry::SchemaRegistry;

pub(crate) fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register::<TaskMetadata>()?;
    registry.register::<DwaveMetadata>()?;
    registry.register::<GateModelTaskResult>()?;
    registry.register::<AnnealingTaskResult>()?;
    Ok(())
}
