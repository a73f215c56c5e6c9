//! IonQ device schemas.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::action::{DeviceActionType, JaqcdDeviceActionProperties};
use super::capabilities::{DeviceCapabilities, DeviceFamily, ProviderProperties};
use super::paradigm::GateModelQpuParadigmProperties;
use super::parameters::GateModelParameters;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, Validate, Validator};

/// Task parameters for IonQ devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IonqDeviceParameters {
    braket_schema_header: SchemaHeader,
    pub paradigm_parameters: GateModelParameters,
}

impl IonqDeviceParameters {
    /// Wrap gate-model parameters.
    pub fn new(paradigm_parameters: GateModelParameters) -> Self {
        Self {
            braket_schema_header: Self::header(),
            paradigm_parameters,
        }
    }
}

impl Validate for IonqDeviceParameters {
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
    IonqDeviceParameters,
    "braket.device_schema.ionq.ionq_device_parameters",
    "1"
);

/// Calibration data published by IonQ.
///
/// `fidelity` maps an operation class (`1q`, `2q`, `spam`) to statistics such
/// as `mean`; `timing` maps an operation or decoherence time (`t1`, `t2`,
/// `readout`, ...) to seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IonqProviderProperties {
    braket_schema_header: SchemaHeader,
    /// QPU the calibration data refers to.
    pub target: String,
    pub fidelity: BTreeMap<String, BTreeMap<String, f64>>,
    pub timing: BTreeMap<String, f64>,
}

impl IonqProviderProperties {
    /// Mean fidelity of an operation class.
    pub fn mean_fidelity(&self, class: &str) -> Option<f64> {
        self.fidelity.get(class)?.get("mean").copied()
    }
}

impl Validate for IonqProviderProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let target = fields.field(v, "target");
        let fidelity = fields.field(v, "fidelity");
        let timing = fields.field(v, "timing");
        Some(Self {
            braket_schema_header: header?,
            target: target?,
            fidelity: fidelity?,
            timing: timing?,
        })
    }
}

schema_document!(
    IonqProviderProperties,
    "braket.device_schema.ionq.ionq_provider_properties",
    "1"
);

/// IonQ QPUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IonqDevice;

impl DeviceFamily for IonqDevice {
    const NAME: &'static str = "braket.device_schema.ionq.ionq_device_capabilities";
    const ACTION_TYPES: &'static [DeviceActionType] = &[DeviceActionType::Jaqcd];

    type Action = JaqcdDeviceActionProperties;
    type Paradigm = GateModelQpuParadigmProperties;
    type Parameters = IonqDeviceParameters;

    fn accepts_provider(provider: &ProviderProperties) -> bool {
        matches!(provider, ProviderProperties::IonqProviderProperties(_))
    }
}

/// Capabilities of an IonQ device.
pub type IonqDeviceCapabilities = DeviceCapabilities<IonqDevice>;
