//! Annealing task results.

use serde::Serialize;
use serde_json::Value;

use super::metadata::{AdditionalMetadata, TaskMetadata};
use crate::error::ErrorKind;
use crate::header::SchemaHeader;
use crate::ir::annealing::ProblemType;
use crate::registry::SchemaDocument;
use crate::validation::{
    BoundedInt, BoundedVec, Fields, NonNegativeInt, UNBOUNDED, Validate, Validator,
};

/// One solution: a value per variable. `3` marks an inactive variable.
pub type Solution = BoundedVec<BoundedInt<-1, 3>, 1, UNBOUNDED>;

/// Result of an annealing task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnealingTaskResult {
    braket_schema_header: SchemaHeader,
    pub solutions: BoundedVec<Solution, 1, UNBOUNDED>,
    /// Occurrences of each solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_counts: Option<Vec<NonNegativeInt>>,
    /// Energy of each solution.
    pub values: Vec<f64>,
    pub variable_count: NonNegativeInt,
    pub task_metadata: TaskMetadata,
    pub additional_metadata: AdditionalMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<ProblemType>,
}

impl AnnealingTaskResult {
    /// Lowest-energy solution and its value.
    pub fn best_solution(&self) -> Option<(&Solution, f64)> {
        self.solutions
            .iter()
            .zip(self.values.iter().copied())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Total number of samples, counting each solution once when counts are absent.
    pub fn sample_count(&self) -> u64 {
        match &self.solution_counts {
            Some(counts) => counts.iter().map(|c| c.get()).sum(),
            None => self.solutions.len() as u64,
        }
    }

    /// Report every cross-field mismatch.
    fn check_consistency(&self, v: &mut Validator) -> bool {
        let before = v.error_count();
        let rows = self.solutions.len();
        let length_mismatch = |v: &mut Validator, key: &str, found: usize| {
            if found != rows {
                v.at_key(key, |v| {
                    v.report(
                        ErrorKind::Inconsistent,
                        format!("{found} entries for {rows} solutions"),
                    )
                });
            }
        };
        length_mismatch(v, "values", self.values.len());
        if let Some(counts) = &self.solution_counts {
            length_mismatch(v, "solutionCounts", counts.len());
        }

        let variables = self.variable_count.get();
        let active = self
            .additional_metadata
            .dwave_metadata
            .as_ref()
            .map(|metadata| metadata.active_variables.len());
        for (i, solution) in self.solutions.iter().enumerate() {
            let width = solution.len();
            let message = if width as u64 > variables {
                Some(format!("{width} values exceed variableCount {variables}"))
            } else {
                active
                    .filter(|&n| n != width)
                    .map(|n| format!("{width} values for {n} active variables"))
            };
            if let Some(message) = message {
                v.at_key("solutions", |v| {
                    v.at_index(i, |v| v.report(ErrorKind::Inconsistent, message))
                });
            }
        }
        v.error_count() == before
    }
}

impl Validate for AnnealingTaskResult {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let solutions = fields.field(v, "solutions");
        let solution_counts = fields.field(v, "solutionCounts");
        let values = fields.field(v, "values");
        let variable_count = fields.field(v, "variableCount");
        let task_metadata = fields.field(v, "taskMetadata");
        let additional_metadata = fields.field(v, "additionalMetadata");
        let problem_type = fields.field(v, "problemType");
        let result = Self {
            braket_schema_header: header?,
            solutions: solutions?,
            solution_counts: solution_counts?,
            values: values?,
            variable_count: variable_count?,
            task_metadata: task_metadata?,
            additional_metadata: additional_metadata?,
            problem_type: problem_type?,
        };
        result.check_consistency(v).then_some(result)
    }
}

schema_document!(
    AnnealingTaskResult,
    "braket.task_result.annealing_task_result",
    "1"
);
