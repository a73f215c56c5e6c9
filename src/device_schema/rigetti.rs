//! Rigetti device schemas.

use serde::Serialize;
use serde_json::Value;

use super::action::{DeviceActionType, JaqcdDeviceActionProperties};
use super::capabilities::{DeviceCapabilities, DeviceFamily, ProviderProperties};
use super::parameters::GateModelParameters;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, Validate, Validator};

pub use super::paradigm::RigettiDeviceParadigmProperties;

/// Task parameters for Rigetti devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RigettiDeviceParameters {
    braket_schema_header: SchemaHeader,
    pub paradigm_parameters: GateModelParameters,
}

impl Validate for RigettiDeviceParameters {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let paradigm_parameters = fields.field(v, "paradigmParameters");
        Some(Self {
            braket_schema_header: header?,
            paradigm_parameters: paradigm_parameters?,
        })
    }
}

schema_document!(
    RigettiDeviceParameters,
    "braket.device_schema.rigetti_device_parameters",
    "1"
);

/// Rigetti QPUs. No provider block is defined for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigettiDevice;

impl DeviceFamily for RigettiDevice {
    const NAME: &'static str = "braket.device_schema.rigetti_device_capabilities";
    const ACTION_TYPES: &'static [DeviceActionType] = &[DeviceActionType::Jaqcd];

    type Action = JaqcdDeviceActionProperties;
    type Paradigm = RigettiDeviceParadigmProperties;
    type Parameters = RigettiDeviceParameters;

    fn accepts_provider(_provider: &ProviderProperties) -> bool {
        false
    }
}

/// Capabilities of a Rigetti device.
pub type RigettiDeviceCapabilities = DeviceCapabilities<RigettiDevice>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn rigetti() -> Value {
        json!({
            "braketSchemaHeader": {
                "name": "braket.device_schema.rigetti_device_capabilities",
                "version": "1"
            },
            "service": {
                "executionWindows": [
                    {"executionDay": "Everyday", "windowStartHour": "11:00:00", "windowEndHour": "12:00:00"}
                ],
                "shotsRange": [1, 100000]
            },
            "action": {
                "braket.ir.jaqcd.program": {
                    "actionType": "braket.ir.jaqcd.program",
                    "version": ["1"],
                    "supportedOperations": ["cnot", "rx"],
                    "supportedResultTypes": [{"name": "expectation", "observables": ["x", "z"]}]
                }
            },
            "paradigm": {
                "braketSchemaHeader": {
                    "name": "braket.device_schema.rigetti_device_paradigm_properties",
                    "version": "1"
                },
                "qubitCount": 32,
                "nativeGateSet": ["cz", "rx", "rz"],
                "connectivity": {"fullyConnected": false, "connectivityGraph": {"0": ["1", "7"]}}
            },
            "deviceParameters": {
                "braketSchemaHeader": {
                    "name": "braket.device_schema.rigetti_device_parameters",
                    "version": "1"
                },
                "paradigmParameters": {"qubitCount": 1}
            }
        })
    }

    #[test]
    fn test_rigetti_capabilities() {
        let caps = RigettiDeviceCapabilities::from_value(&rigetti()).unwrap();
        assert_eq!(caps.paradigm.qubit_count.get(), 32);
        assert!(caps.paradigm.connectivity.is_connected(7, 0));
        assert_eq!(caps.device_parameters.paradigm_parameters.qubit_count.get(), 1);
        assert!(caps.service.accepts_shots(100000));
    }

    #[test]
    fn test_rigetti_rejects_provider_block() {
        let mut doc = rigetti();
        doc["provider"] = json!({
            "braketSchemaHeader": {
                "name": "braket.device_schema.ionq.ionq_provider_properties",
                "version": "1"
            },
            "target": "qpu",
            "fidelity": {},
            "timing": {}
        });
        let errors = RigettiDeviceCapabilities::from_value(&doc).unwrap_err();
        assert!(errors.contains("provider.braketSchemaHeader", ErrorKind::UnsupportedVariant));
    }

    #[test]
    fn test_rigetti_rejects_generic_paradigm() {
        let mut doc = rigetti();
        doc["paradigm"]["braketSchemaHeader"]["name"] =
            json!("braket.device_schema.gate_model_qpu_paradigm_properties");
        let errors = RigettiDeviceCapabilities::from_value(&doc).unwrap_err();
        assert!(errors.contains("paradigm.braketSchemaHeader", ErrorKind::HeaderMismatch));
    }
}
