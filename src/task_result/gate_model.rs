//! Gate-model task results.
//!
//! # Bitstring ordering
//!
//! A measurement row lists one bit per measured qubit, in the order of
//! `measuredQubits`. The bitstring of a row is those bits left to right, so
//! `"01"` with `measuredQubits: [0, 1]` means qubit 0 measured `0` and qubit 1
//! measured `1`.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

use super::metadata::{AdditionalMetadata, TaskMetadata};
use crate::error::ErrorKind;
use crate::header::SchemaHeader;
use crate::ir::jaqcd::ResultType;
use crate::registry::SchemaDocument;
use crate::validation::{
    Bitstring, BoundedInt, BoundedVec, Fields, NonNegativeInt, UNBOUNDED, UnitInterval, Validate,
    Validator,
};

/// One shot: a bit per measured qubit.
pub type MeasurementRow = BoundedVec<BoundedInt<0, 1>, 1, UNBOUNDED>;

/// A requested result type together with its computed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTypeValue {
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub value: Value,
}

impl Validate for ResultTypeValue {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let result_type = fields.field(v, "type");
        let value = fields.field_with(v, "value", || Some(Value::Null), Value::validate);
        Some(Self {
            result_type: result_type?,
            value: value?,
        })
    }
}

deserialize_via_validate!(ResultTypeValue);

/// Histogram of measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementCounts {
    counts: FxHashMap<String, u64>,
}

impl MeasurementCounts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Occurrences of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent bitstring. Ties break towards the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Relative frequency of each bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &n)| (k.clone(), n as f64 / total))
            .collect()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no shot was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for MeasurementCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Result of a gate-model task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateModelTaskResult {
    braket_schema_header: SchemaHeader,
    /// Per-shot measurements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BoundedVec<MeasurementRow, 1, UNBOUNDED>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_probabilities: Option<BTreeMap<Bitstring, UnitInterval>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_types: Option<Vec<ResultTypeValue>>,
    /// Qubits the measurement columns refer to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_qubits: Option<Vec<NonNegativeInt>>,
    pub task_metadata: TaskMetadata,
    pub additional_metadata: AdditionalMetadata,
}

impl GateModelTaskResult {
    /// Count the measured bitstrings. Empty when no measurements were returned.
    pub fn measurement_counts(&self) -> MeasurementCounts {
        let mut counts = MeasurementCounts::new();
        for row in self.measurements.iter().flat_map(|rows| rows.iter()) {
            let bits: String = row
                .iter()
                .map(|bit| if bit.get() == 1 { '1' } else { '0' })
                .collect();
            counts.insert(bits, 1);
        }
        counts
    }

    /// Number of measurement columns, from the first row.
    pub fn measured_width(&self) -> Option<usize> {
        self.measurements.as_ref().and_then(|rows| rows.first()).map(|row| row.len())
    }
}

/// Report rows whose width differs from the first row or from `measuredQubits`.
fn check_measurement_shape(
    measurements: &[MeasurementRow],
    measured_qubits: Option<&[NonNegativeInt]>,
    v: &mut Validator,
) -> bool {
    let Some(width) = measurements.first().map(|row| row.len()) else {
        return true;
    };
    let before = v.error_count();
    for (i, row) in measurements.iter().enumerate().skip(1) {
        if row.len() != width {
            v.at_key("measurements", |v| {
                v.at_index(i, |v| {
                    v.report(
                        ErrorKind::Inconsistent,
                        format!("row has {} entries, first row has {width}", row.len()),
                    )
                })
            });
        }
    }
    if let Some(qubits) = measured_qubits {
        if qubits.len() != width {
            v.at_key("measuredQubits", |v| {
                v.report(
                    ErrorKind::Inconsistent,
                    format!("{} qubits listed, measurements have {width} columns", qubits.len()),
                )
            });
        }
    }
    v.error_count() == before
}

impl Validate for GateModelTaskResult {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let measurements: Option<Option<BoundedVec<MeasurementRow, 1, UNBOUNDED>>> =
            fields.field(v, "measurements");
        let measurement_probabilities = fields.field(v, "measurementProbabilities");
        let result_types = fields.field(v, "resultTypes");
        let measured_qubits: Option<Option<Vec<NonNegativeInt>>> =
            fields.field(v, "measuredQubits");
        let task_metadata = fields.field(v, "taskMetadata");
        let additional_metadata = fields.field(v, "additionalMetadata");

        if let (Some(Some(rows)), Some(qubits)) = (&measurements, &measured_qubits) {
            if !check_measurement_shape(rows, qubits.as_deref(), v) {
                return None;
            }
        }

        Some(Self {
            braket_schema_header: header?,
            measurements: measurements?,
            measurement_probabilities: measurement_probabilities?,
            result_types: result_types?,
            measured_qubits: measured_qubits?,
            task_metadata: task_metadata?,
            additional_metadata: additional_metadata?,
        })
    }
}

schema_document!(
    GateModelTaskResult,
    "braket.task_result.gate_model_task_result",
    "1"
);
