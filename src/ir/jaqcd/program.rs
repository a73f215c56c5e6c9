//! The root circuit document.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use super::{Instruction, ResultType};
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, Validate, Validator};

/// A gate-model circuit: instructions, optional result requests and optional
/// basis rotations applied before measurement.
///
/// ```json
/// {
///   "braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"},
///   "instructions": [{"type": "h", "target": 0}, {"type": "cnot", "control": 0, "target": 1}],
///   "results": [{"type": "expectation", "observable": ["x"], "targets": [0]}],
///   "basis_rotation_instructions": [{"type": "h", "target": 0}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    #[serde(rename = "braketSchemaHeader")]
    braket_schema_header: SchemaHeader,
    /// Operations in execution order.
    pub instructions: Vec<Instruction>,
    /// Requested results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultType>>,
    /// Rotations into the measurement basis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis_rotation_instructions: Option<Vec<Instruction>>,
}

impl Program {
    /// Create a program with no results or basis rotations.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            braket_schema_header: Self::header(),
            instructions,
            results: None,
            basis_rotation_instructions: None,
        }
    }

    /// Attach result requests.
    pub fn with_results(mut self, results: Vec<ResultType>) -> Self {
        self.results = Some(results);
        self
    }

    /// Attach basis rotation instructions.
    pub fn with_basis_rotations(mut self, instructions: Vec<Instruction>) -> Self {
        self.basis_rotation_instructions = Some(instructions);
        self
    }

    /// Every qubit index referenced by an instruction, rotation or result.
    pub fn qubits_used(&self) -> BTreeSet<u64> {
        let rotations = self.basis_rotation_instructions.iter().flatten();
        let mut used: BTreeSet<u64> = self
            .instructions
            .iter()
            .chain(rotations)
            .flat_map(Instruction::qubits)
            .collect();
        for result in self.results.iter().flatten() {
            used.extend(result.qubits());
        }
        used
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Validate for Program {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let instructions = fields.field(v, "instructions");
        let results = fields.field(v, "results");
        let basis_rotation_instructions = fields.field(v, "basis_rotation_instructions");
        Some(Self {
            braket_schema_header: header?,
            instructions: instructions?,
            results: results?,
            basis_rotation_instructions: basis_rotation_instructions?,
        })
    }
}

schema_document!(Program, "braket.ir.jaqcd.program", "1");

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn bell() -> Value {
        json!({
            "braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"},
            "instructions": [
                {"type": "h", "target": 0},
                {"type": "cnot", "control": 0, "target": 1}
            ],
            "results": [{"type": "expectation", "observable": ["z"], "targets": [2]}],
            "basis_rotation_instructions": [{"type": "h", "target": 3}]
        })
    }

    #[test]
    fn test_parse_program() {
        let program = Program::from_value(&bell()).unwrap();
        assert_eq!(program.instructions.len(), 2);
        assert_eq!(program.schema_header().name(), "braket.ir.jaqcd.program");
        assert_eq!(program.qubits_used().into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_round_trip() {
        let program = Program::from_value(&bell()).unwrap();
        let text = serde_json::to_string(&program).unwrap();
        assert_eq!(Program::parse_raw(&text).unwrap(), program);
        assert_eq!(serde_json::from_str::<Program>(&text).unwrap(), program);
    }

    #[test]
    fn test_header_defaults_when_absent() {
        let program = Program::from_value(&json!({"instructions": []})).unwrap();
        assert_eq!(program, Program::default());
    }

    #[test]
    fn test_header_mismatch() {
        let value = json!({
            "braketSchemaHeader": {"name": "braket.ir.annealing.problem", "version": "1"},
            "instructions": []
        });
        let errors = Program::from_value(&value).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::HeaderMismatch));
    }

    #[test]
    fn test_errors_carry_instruction_paths() {
        let value = json!({
            "instructions": [
                {"type": "h", "target": 0},
                {"type": "rx", "target": -1, "angle": 0.1},
                {"type": "nope"}
            ],
            "results": [{"type": "variance"}]
        });
        let errors = Program::from_value(&value).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("instructions[1].target", ErrorKind::Constraint));
        assert!(errors.contains("instructions[2].type", ErrorKind::UnsupportedVariant));
        assert!(errors.contains("results[0].observable", ErrorKind::Missing));
    }

    #[test]
    fn test_builder() {
        let program = Program::new(vec![]).with_basis_rotations(vec![]);
        let out = serde_json::to_value(&program).unwrap();
        assert_eq!(out["basis_rotation_instructions"], json!([]));
        assert!(out.get("results").is_none());
    }
}
