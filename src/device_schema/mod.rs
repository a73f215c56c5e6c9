//! Device capability documents and the sub-documents they embed.
//!
//! A capabilities document describes what a device accepts: when it runs,
//! how many shots, which program formats and gates, its qubit layout and the
//! parameters a task may set. The generic document accepts any registered
//! sub-document; each provider module pins its own.

pub mod action;
pub mod capabilities;
pub mod dwave;
pub mod ionq;
pub mod paradigm;
pub mod parameters;
pub mod rigetti;
pub mod service;
pub mod simulator;

pub use action::{
    ActionProperties, DeviceActionProperties, DeviceActionType, JaqcdDeviceActionProperties,
    ResultTypeProperties,
};
pub use capabilities::{
    DeviceCapabilities, DeviceFamily, GenericDevice, GenericDeviceCapabilities, ProviderProperties,
};
pub use dwave::{
    DwaveDevice, DwaveDeviceCapabilities, DwaveDeviceParameters, DwaveProviderLevelParameters,
    DwaveProviderProperties,
};
pub use ionq::{IonqDevice, IonqDeviceCapabilities, IonqDeviceParameters, IonqProviderProperties};
pub use paradigm::{
    AnnealingParadigmProperties, DeviceConnectivity, GateModelQpuParadigmProperties,
    ParadigmProperties, RigettiDeviceParadigmProperties,
};
pub use parameters::{DeviceParameters, GateModelParameters};
pub use rigetti::{RigettiDevice, RigettiDeviceCapabilities, RigettiDeviceParameters};
pub use service::{
    DeviceCost, DeviceDocumentation, DeviceExecutionWindow, DeviceServiceProperties,
    ExecutionDay, ShotsRange,
};
pub use simulator::{
    GateModelSimulatorDevice, GateModelSimulatorDeviceCapabilities,
    GateModelSimulatorParadigmProperties, SIMULATOR_MAX_QUBITS, SimulatorDeviceParameters,
};

use crate::error::SchemaResult;
use crate::registry::SchemaRegistry;

pub(crate) fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register::<DeviceServiceProperties>()?;

    registry.register::<GenericDeviceCapabilities>()?;
    registry.register::<IonqDeviceCapabilities>()?;
    registry.register::<RigettiDeviceCapabilities>()?;
    registry.register::<GateModelSimulatorDeviceCapabilities>()?;
    registry.register::<DwaveDeviceCapabilities>()?;

    registry.register::<GateModelQpuParadigmProperties>()?;
    registry.register::<RigettiDeviceParadigmProperties>()?;
    registry.register::<GateModelSimulatorParadigmProperties>()?;
    registry.register::<AnnealingParadigmProperties>()?;

    registry.register::<GateModelParameters>()?;
    registry.register::<IonqDeviceParameters>()?;
    registry.register::<RigettiDeviceParameters>()?;
    registry.register::<SimulatorDeviceParameters>()?;
    registry.register::<DwaveDeviceParameters>()?;
    registry.register::<DwaveProviderLevelParameters>()?;

    registry.register::<IonqProviderProperties>()?;
    registry.register::<DwaveProviderProperties>()?;
    Ok(())
}
