//! Device parameters supplied when creating a task.

use serde::Serialize;
use serde_json::Value;

use super::dwave::DwaveDeviceParameters;
use super::ionq::IonqDeviceParameters;
use super::rigetti::RigettiDeviceParameters;
use super::simulator::SimulatorDeviceParameters;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, NonNegativeInt, Validate, Validator};

/// Parameters shared by every gate-model device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateModelParameters {
    braket_schema_header: SchemaHeader,
    /// Qubits the circuit uses.
    pub qubit_count: NonNegativeInt,
    /// Run on the given qubit indices without remapping. Defaults to `false`.
    pub disable_qubit_rewiring: bool,
}

impl GateModelParameters {
    /// Create parameters for `qubit_count` qubits with rewiring enabled.
    pub fn new(qubit_count: u64) -> Self {
        Self {
            braket_schema_header: Self::header(),
            qubit_count: qubit_count.into(),
            disable_qubit_rewiring: false,
        }
    }
}

impl Validate for GateModelParameters {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let qubit_count = fields.field(v, "qubitCount");
        let disable_qubit_rewiring =
            fields.field_with(v, "disableQubitRewiring", || Some(false), bool::validate);
        Some(Self {
            braket_schema_header: header?,
            qubit_count: qubit_count?,
            disable_qubit_rewiring: disable_qubit_rewiring?,
        })
    }
}

schema_document!(GateModelParameters, "braket.device_schema.gate_model_parameters", "1");

document_union! {
    /// Any registered device-parameter document, selected by its header.
    pub enum DeviceParameters: "device parameters" {
        GateModelParameters(GateModelParameters),
        IonqDeviceParameters(IonqDeviceParameters),
        RigettiDeviceParameters(RigettiDeviceParameters),
        SimulatorDeviceParameters(SimulatorDeviceParameters),
        DwaveDeviceParameters(DwaveDeviceParameters),
    }
}
