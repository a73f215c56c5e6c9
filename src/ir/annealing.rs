//! Annealing problems (`braket.ir.annealing`).

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{CouplerKey, Fields, NonNegativeInt, Validate, Validator};

literal_enum! {
    /// Objective form of an annealing problem.
    pub enum ProblemType {
        /// Quadratic unconstrained binary optimization.
        Qubo = "QUBO",
        /// Ising spin model.
        Ising = "ISING",
    }
}

/// An annealing problem over indexed variables.
///
/// ```json
/// {
///   "braketSchemaHeader": {"name": "braket.ir.annealing.problem", "version": "1"},
///   "type": "QUBO",
///   "linear": {"0": 0.3333, "1": -0.333},
///   "quadratic": {"0,1": 0.667}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    #[serde(rename = "braketSchemaHeader")]
    braket_schema_header: SchemaHeader,
    /// QUBO or Ising.
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    /// Bias per variable.
    pub linear: BTreeMap<NonNegativeInt, f64>,
    /// Coupling per `"i,j"` variable pair.
    pub quadratic: BTreeMap<CouplerKey, f64>,
}

impl Problem {
    /// Create a problem.
    pub fn new(
        problem_type: ProblemType,
        linear: BTreeMap<NonNegativeInt, f64>,
        quadratic: BTreeMap<CouplerKey, f64>,
    ) -> Self {
        Self {
            braket_schema_header: Self::header(),
            problem_type,
            linear,
            quadratic,
        }
    }

    /// Largest variable index mentioned, if any.
    pub fn max_variable(&self) -> Option<u64> {
        let linear = self.linear.keys().map(|k| k.get());
        let quadratic = self.quadratic.keys().flat_map(|key| {
            key.as_str()
                .split(',')
                .filter_map(|part| part.parse::<u64>().ok())
                .collect::<Vec<_>>()
        });
        linear.chain(quadratic).max()
    }
}

impl Validate for Problem {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let problem_type = fields.field(v, "type");
        let linear = fields.field(v, "linear");
        let quadratic = fields.field(v, "quadratic");
        Some(Self {
            braket_schema_header: header?,
            problem_type: problem_type?,
            linear: linear?,
            quadratic: quadratic?,
        })
    }
}

schema_document!(Problem, "braket.ir.annealing.problem", "1");
