//! D-Wave annealer schemas.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::action::{DeviceActionProperties, DeviceActionType};
use super::capabilities::{DeviceCapabilities, DeviceFamily, ProviderProperties};
use super::paradigm::AnnealingParadigmProperties;
use super::service::ShotsRange;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{BoundedInt, BoundedVec, Fields, NonNegativeInt, Validate, Validator};

/// An integer `>= 1`.
pub type PositiveInt = BoundedInt<1, { i64::MAX }>;

/// A closed float interval written as `[low, high]`.
pub type FloatRange = BoundedVec<f64, 2, 2>;

/// A closed integer interval written as `[low, high]`.
pub type IntRange = BoundedVec<NonNegativeInt, 2, 2>;

literal_enum! {
    /// Post-processing applied to samples on the provider side.
    pub enum PostProcessingType {
        Sampling = "SAMPLING",
        Optimization = "OPTIMIZATION",
    }
}

literal_enum! {
    /// How samples are returned.
    pub enum ResultFormat {
        Raw = "RAW",
        Histogram = "HISTOGRAM",
    }
}

/// Solver parameters forwarded to D-Wave. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwaveProviderLevelParameters {
    braket_schema_header: SchemaHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annealing_offsets: Option<Vec<f64>>,
    /// Points `[time, s]` of a custom anneal schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annealing_schedule: Option<Vec<FloatRange>>,
    /// Anneal time in microseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annealing_duration: Option<PositiveInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<Vec<Vec<NonNegativeInt>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensate_flux_drift: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_biases: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<Vec<BoundedInt<-1, 3>>>,
    /// Distinct samples to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<PositiveInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postprocessing_type: Option<PostProcessingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programming_thermalization_duration: Option<NonNegativeInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readout_thermalization_duration: Option<NonNegativeInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_intersample_correlation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reinitialize_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_format: Option<ResultFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_reversal_transform_count: Option<NonNegativeInt>,
}

impl DwaveProviderLevelParameters {
    /// Parameters with every field unset.
    pub fn new() -> Self {
        Self {
            braket_schema_header: Self::header(),
            annealing_offsets: None,
            annealing_schedule: None,
            annealing_duration: None,
            auto_scale: None,
            beta: None,
            chains: None,
            compensate_flux_drift: None,
            flux_biases: None,
            initial_state: None,
            max_results: None,
            postprocessing_type: None,
            programming_thermalization_duration: None,
            readout_thermalization_duration: None,
            reduce_intersample_correlation: None,
            reinitialize_state: None,
            result_format: None,
            spin_reversal_transform_count: None,
        }
    }
}

impl Default for DwaveProviderLevelParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for DwaveProviderLevelParameters {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let annealing_offsets = fields.field(v, "annealingOffsets");
        let annealing_schedule = fields.field(v, "annealingSchedule");
        let annealing_duration = fields.field(v, "annealingDuration");
        let auto_scale = fields.field(v, "autoScale");
        let beta = fields.field(v, "beta");
        let chains = fields.field(v, "chains");
        let compensate_flux_drift = fields.field(v, "compensateFluxDrift");
        let flux_biases = fields.field(v, "fluxBiases");
        let initial_state = fields.field(v, "initialState");
        let max_results = fields.field(v, "maxResults");
        let postprocessing_type = fields.field(v, "postprocessingType");
        let programming_thermalization_duration =
            fields.field(v, "programmingThermalizationDuration");
        let readout_thermalization_duration = fields.field(v, "readoutThermalizationDuration");
        let reduce_intersample_correlation = fields.field(v, "reduceIntersampleCorrelation");
        let reinitialize_state = fields.field(v, "reinitializeState");
        let result_format = fields.field(v, "resultFormat");
        let spin_reversal_transform_count = fields.field(v, "spinReversalTransformCount");
        Some(Self {
            braket_schema_header: header?,
            annealing_offsets: annealing_offsets?,
            annealing_schedule: annealing_schedule?,
            annealing_duration: annealing_duration?,
            auto_scale: auto_scale?,
            beta: beta?,
            chains: chains?,
            compensate_flux_drift: compensate_flux_drift?,
            flux_biases: flux_biases?,
            initial_state: initial_state?,
            max_results: max_results?,
            postprocessing_type: postprocessing_type?,
            programming_thermalization_duration: programming_thermalization_duration?,
            readout_thermalization_duration: readout_thermalization_duration?,
            reduce_intersample_correlation: reduce_intersample_correlation?,
            reinitialize_state: reinitialize_state?,
            result_format: result_format?,
            spin_reversal_transform_count: spin_reversal_transform_count?,
        })
    }
}

schema_document!(
    DwaveProviderLevelParameters,
    "braket.device_schema.dwave.dwave_provider_level_parameters",
    "1"
);

/// Task parameters for D-Wave devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwaveDeviceParameters {
    braket_schema_header: SchemaHeader,
    pub provider_level_parameters: DwaveProviderLevelParameters,
}

impl DwaveDeviceParameters {
    /// Wrap provider-level parameters.
    pub fn new(provider_level_parameters: DwaveProviderLevelParameters) -> Self {
        Self {
            braket_schema_header: Self::header(),
            provider_level_parameters,
        }
    }
}

impl Validate for DwaveDeviceParameters {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let provider_level_parameters = fields.field(v, "providerLevelParameters");
        Some(Self {
            braket_schema_header: header?,
            provider_level_parameters: provider_level_parameters?,
        })
    }
}

schema_document!(
    DwaveDeviceParameters,
    "braket.device_schema.dwave.dwave_device_parameters",
    "1"
);

/// Solver properties published by D-Wave.
///
/// Durations are in microseconds. `couplers` lists the working qubit pairs;
/// `topology` describes the graph family (`{"type": "chimera", "shape": [16, 16, 4]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwaveProviderProperties {
    braket_schema_header: SchemaHeader,
    pub annealing_offset_step: f64,
    pub annealing_offset_step_phi0: f64,
    pub annealing_offset_ranges: Vec<FloatRange>,
    pub annealing_duration_range: IntRange,
    pub couplers: Vec<IntRange>,
    pub default_annealing_duration: NonNegativeInt,
    pub default_programming_thermalization_duration: NonNegativeInt,
    pub default_readout_thermalization_duration: NonNegativeInt,
    pub extended_j_range: FloatRange,
    pub h_gain_schedule_range: FloatRange,
    pub maximum_annealing_schedule_points: NonNegativeInt,
    pub maximum_h_gain_schedule_points: NonNegativeInt,
    pub per_qubit_coupling_range: FloatRange,
    pub problem_run_duration_range: IntRange,
    pub programming_thermalization_duration_range: IntRange,
    pub qubits: Vec<NonNegativeInt>,
    pub qubit_count: NonNegativeInt,
    pub quota_conversion_rate: f64,
    pub readout_thermalization_duration_range: IntRange,
    pub shots_range: ShotsRange,
    pub task_run_duration_range: IntRange,
    pub topology: BTreeMap<String, Value>,
}

impl DwaveProviderProperties {
    /// Check whether the solver has a working coupler between two qubits.
    pub fn has_coupler(&self, q1: u64, q2: u64) -> bool {
        self.couplers.iter().any(|pair| {
            let (a, b) = (pair[0].get(), pair[1].get());
            (a == q1 && b == q2) || (a == q2 && b == q1)
        })
    }

    /// Check whether a qubit is working.
    pub fn has_qubit(&self, qubit: u64) -> bool {
        self.qubits.iter().any(|q| q.get() == qubit)
    }
}

impl Validate for DwaveProviderProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let annealing_offset_step = fields.field(v, "annealingOffsetStep");
        let annealing_offset_step_phi0 = fields.field(v, "annealingOffsetStepPhi0");
        let annealing_offset_ranges = fields.field(v, "annealingOffsetRanges");
        let annealing_duration_range = fields.field(v, "annealingDurationRange");
        let couplers = fields.field(v, "couplers");
        let default_annealing_duration = fields.field(v, "defaultAnnealingDuration");
        let default_programming_thermalization_duration =
            fields.field(v, "defaultProgrammingThermalizationDuration");
        let default_readout_thermalization_duration =
            fields.field(v, "defaultReadoutThermalizationDuration");
        let extended_j_range = fields.field(v, "extendedJRange");
        let h_gain_schedule_range = fields.field(v, "hGainScheduleRange");
        let maximum_annealing_schedule_points = fields.field(v, "maximumAnnealingSchedulePoints");
        let maximum_h_gain_schedule_points = fields.field(v, "maximumHGainSchedulePoints");
        let per_qubit_coupling_range = fields.field(v, "perQubitCouplingRange");
        let problem_run_duration_range = fields.field(v, "problemRunDurationRange");
        let programming_thermalization_duration_range =
            fields.field(v, "programmingThermalizationDurationRange");
        let qubits = fields.field(v, "qubits");
        let qubit_count = fields.field(v, "qubitCount");
        let quota_conversion_rate = fields.field(v, "quotaConversionRate");
        let readout_thermalization_duration_range =
            fields.field(v, "readoutThermalizationDurationRange");
        let shots_range = fields.field(v, "shotsRange");
        let task_run_duration_range = fields.field(v, "taskRunDurationRange");
        let topology = fields.field(v, "topology");
        Some(Self {
            braket_schema_header: header?,
            annealing_offset_step: annealing_offset_step?,
            annealing_offset_step_phi0: annealing_offset_step_phi0?,
            annealing_offset_ranges: annealing_offset_ranges?,
            annealing_duration_range: annealing_duration_range?,
            couplers: couplers?,
            default_annealing_duration: default_annealing_duration?,
            default_programming_thermalization_duration:
                default_programming_thermalization_duration?,
            default_readout_thermalization_duration: default_readout_thermalization_duration?,
            extended_j_range: extended_j_range?,
            h_gain_schedule_range: h_gain_schedule_range?,
            maximum_annealing_schedule_points: maximum_annealing_schedule_points?,
            maximum_h_gain_schedule_points: maximum_h_gain_schedule_points?,
            per_qubit_coupling_range: per_qubit_coupling_range?,
            problem_run_duration_range: problem_run_duration_range?,
            programming_thermalization_duration_range: programming_thermalization_duration_range?,
            qubits: qubits?,
            qubit_count: qubit_count?,
            quota_conversion_rate: quota_conversion_rate?,
            readout_thermalization_duration_range: readout_thermalization_duration_range?,
            shots_range: shots_range?,
            task_run_duration_range: task_run_duration_range?,
            topology: topology?,
        })
    }
}

schema_document!(
    DwaveProviderProperties,
    "braket.device_schema.dwave.dwave_provider_properties",
    "1"
);

/// D-Wave quantum annealers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwaveDevice;

impl DeviceFamily for DwaveDevice {
    const NAME: &'static str = "braket.device_schema.dwave.dwave_device_capabilities";
    const ACTION_TYPES: &'static [DeviceActionType] = &[DeviceActionType::Annealing];

    type Action = DeviceActionProperties;
    type Paradigm = AnnealingParadigmProperties;
    type Parameters = DwaveDeviceParameters;

    fn accepts_provider(provider: &ProviderProperties) -> bool {
        matches!(provider, ProviderProperties::DwaveProviderProperties(_))
    }
}

/// Capabilities of a D-Wave device.
pub type DwaveDeviceCapabilities = DeviceCapabilities<DwaveDevice>;
