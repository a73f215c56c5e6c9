//! Gate-model simulator schemas.

use serde::Serialize;
use serde_json::Value;

use super::action::{DeviceActionType, JaqcdDeviceActionProperties};
use super::capabilities::{DeviceCapabilities, DeviceFamily, ProviderProperties};
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{BoundedInt, Fields, NonNegativeInt, Validate, Validator};

/// Largest circuit a simulator task may request.
pub const SIMULATOR_MAX_QUBITS: i64 = 30;

/// Qubit count of a simulator task: `1..=30`.
pub type SimulatorQubitCount = BoundedInt<1, SIMULATOR_MAX_QUBITS>;

/// Paradigm properties of a gate-model simulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateModelSimulatorParadigmProperties {
    braket_schema_header: SchemaHeader,
    /// Most qubits the simulator supports.
    pub qubit_count: NonNegativeInt,
}

impl Validate for GateModelSimulatorParadigmProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let qubit_count = fields.field(v, "qubitCount");
        Some(Self {
            braket_schema_header: header?,
            qubit_count: qubit_count?,
        })
    }
}

schema_document!(
    GateModelSimulatorParadigmProperties,
    "braket.device_schema.simulators.gate_model_simulator_paradigm_properties",
    "1"
);

/// Task parameters for simulators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorDeviceParameters {
    braket_schema_header: SchemaHeader,
    pub qubit_count: SimulatorQubitCount,
}

impl Validate for SimulatorDeviceParameters {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let qubit_count = fields.field(v, "qubitCount");
        Some(Self {
            braket_schema_header: header?,
            qubit_count: qubit_count?,
        })
    }
}

schema_document!(
    SimulatorDeviceParameters,
    "braket.device_schema.simulator_device_parameters",
    "1"
);

/// Managed gate-model simulators. No provider block is defined for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateModelSimulatorDevice;

impl DeviceFamily for GateModelSimulatorDevice {
    const NAME: &'static str =
        "braket.device_schema.simulators.gate_model_simulator_device_capabilities";
    const ACTION_TYPES: &'static [DeviceActionType] = &[DeviceActionType::Jaqcd];

    type Action = JaqcdDeviceActionProperties;
    type Paradigm = GateModelSimulatorParadigmProperties;
    type Parameters = SimulatorDeviceParameters;

    fn accepts_provider(_provider: &ProviderProperties) -> bool {
        false
    }
}

/// Capabilities of a gate-model simulator.
pub type GateModelSimulatorDeviceCapabilities = DeviceCapabilities<GateModelSimulatorDevice>;
