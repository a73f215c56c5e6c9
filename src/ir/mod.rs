//! Program intermediate representations submitted to devices.

pub mod annealing;
pub mod jaqcd;

use crate::error::SchemaResult;
use crate::registry::SchemaRegistry;

pub(crate) fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register::<jaqcd::Program>()?;
    registry.register::<annealing::Problem>()?;
    Ok(())
}
