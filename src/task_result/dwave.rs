//! D-Wave specific result metadata.

use serde::Serialize;
use serde_json::Value;

use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, NonNegativeInt, Validate, Validator};

/// Declare the timing struct: every field optional, camelCase on the wire.
macro_rules! timing {
    ($(#[$meta:meta])* pub struct $name:ident { $($field:ident: $wire:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<NonNegativeInt>,
            )+
        }

        impl Validate for $name {
            fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
                let fields = Fields::of(value, v)?;
                $(let $field = fields.field(v, $wire);)+
                Some(Self { $($field: $field?,)+ })
            }
        }

        deserialize_via_validate!($name);
    };
}

timing! {
    /// QPU timing breakdown of a D-Wave task, in microseconds.
    pub struct DwaveTiming {
        qpu_sampling_time: "qpuSamplingTime",
        qpu_anneal_time_per_sample: "qpuAnnealTimePerSample",
        qpu_readout_time_per_sample: "qpuReadoutTimePerSample",
        qpu_access_time: "qpuAccessTime",
        qpu_access_overhead_time: "qpuAccessOverheadTime",
        qpu_programming_time: "qpuProgrammingTime",
        qpu_delay_time_per_sample: "qpuDelayTimePerSample",
        total_post_processing_time: "totalPostProcessingTime",
        post_processing_overhead_time: "postProcessingOverheadTime",
        total_real_time: "totalRealTime",
        run_time_chip: "runTimeChip",
        anneal_time_per_run: "annealTimePerRun",
        readout_time_per_run: "readoutTimePerRun",
    }
}

/// Metadata attached to results of tasks run on D-Wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwaveMetadata {
    braket_schema_header: SchemaHeader,
    /// Problem variables the solver used, in solution column order.
    pub active_variables: Vec<NonNegativeInt>,
    pub timing: DwaveTiming,
}

impl DwaveMetadata {
    /// Create metadata.
    pub fn new(active_variables: Vec<NonNegativeInt>, timing: DwaveTiming) -> Self {
        Self {
            braket_schema_header: Self::header(),
            active_variables,
            timing,
        }
    }
}

impl Validate for DwaveMetadata {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let active_variables = fields.field(v, "activeVariables");
        let timing = fields.field(v, "timing");
        Some(Self {
            braket_schema_header: header?,
            active_variables: active_variables?,
            timing: timing?,
        })
    }
}

schema_document!(DwaveMetadata, "braket.task_result.dwave_metadata", "1");
