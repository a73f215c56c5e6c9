//! Task metadata shared by every result document.

use serde::Serialize;
use serde_json::Value;

use super::dwave::DwaveMetadata;
use crate::device_schema::DeviceParameters;
use crate::error::ErrorKind;
use crate::header::SchemaHeader;
use crate::ir::annealing::Problem;
use crate::ir::jaqcd::Program;
use crate::registry::SchemaDocument;
use crate::validation::{BoundedString, Fields, NonNegativeInt, UNBOUNDED, Validate, Validator};

/// Task identity, shot count and lifecycle timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    braket_schema_header: SchemaHeader,
    /// Task ARN or other identifier.
    pub id: BoundedString<1, UNBOUNDED>,
    /// Shots requested.
    pub shots: NonNegativeInt,
    /// Device the task ran on.
    pub device_id: BoundedString<1, UNBOUNDED>,
    /// Parameters the task was submitted with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_parameters: Option<DeviceParameters>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BoundedString<0, 24>>,
    /// Completion timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<BoundedString<0, 24>>,
    /// Final task status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BoundedString<0, 20>>,
    /// Why the task failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<BoundedString<0, 255>>,
}

impl TaskMetadata {
    /// Create metadata with no optional fields set.
    pub fn new(
        id: BoundedString<1, UNBOUNDED>,
        shots: u64,
        device_id: BoundedString<1, UNBOUNDED>,
    ) -> Self {
        Self {
            braket_schema_header: Self::header(),
            id,
            shots: shots.into(),
            device_id,
            device_parameters: None,
            created_at: None,
            ended_at: None,
            status: None,
            failure_reason: None,
        }
    }
}

impl Validate for TaskMetadata {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let id = fields.field(v, "id");
        let shots = fields.field(v, "shots");
        let device_id = fields.field(v, "deviceId");
        let device_parameters = fields.field(v, "deviceParameters");
        let created_at = fields.field(v, "createdAt");
        let ended_at = fields.field(v, "endedAt");
        let status = fields.field(v, "status");
        let failure_reason = fields.field(v, "failureReason");
        Some(Self {
            braket_schema_header: header?,
            id: id?,
            shots: shots?,
            device_id: device_id?,
            device_parameters: device_parameters?,
            created_at: created_at?,
            ended_at: ended_at?,
            status: status?,
            failure_reason: failure_reason?,
        })
    }
}

schema_document!(TaskMetadata, "braket.task_result.task_metadata", "1");

/// The program a task ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionPayload {
    /// A gate-model circuit.
    Program(Program),
    /// An annealing problem.
    Problem(Problem),
}

impl ActionPayload {
    /// Header of the wrapped document.
    pub fn schema_header(&self) -> &SchemaHeader {
        match self {
            Self::Program(program) => program.schema_header(),
            Self::Problem(problem) => problem.schema_header(),
        }
    }
}

impl From<Program> for ActionPayload {
    fn from(program: Program) -> Self {
        Self::Program(program)
    }
}

impl From<Problem> for ActionPayload {
    fn from(problem: Problem) -> Self {
        Self::Problem(problem)
    }
}

impl Validate for ActionPayload {
    /// Select the variant by header name, or by shape when the header is
    /// absent: `instructions` marks a program, `linear`/`quadratic` a problem.
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        match SchemaHeader::of(value) {
            Some(header) if header.name() == Program::NAME => {
                Program::validate(value, v).map(Self::Program)
            }
            Some(header) if header.name() == Problem::NAME => {
                Problem::validate(value, v).map(Self::Problem)
            }
            Some(header) => {
                v.at_key(SchemaHeader::FIELD, |v| {
                    v.report(
                        ErrorKind::UnsupportedVariant,
                        format!("`{header}` is not a program or annealing problem"),
                    )
                });
                None
            }
            None if fields.has("instructions") => Program::validate(value, v).map(Self::Program),
            None if fields.has("linear") || fields.has("quadratic") => {
                Problem::validate(value, v).map(Self::Problem)
            }
            None => {
                v.report(
                    ErrorKind::UnsupportedVariant,
                    "expected a program (`instructions`) or an annealing problem (`linear`, `quadratic`)",
                );
                None
            }
        }
    }
}

deserialize_via_validate!(ActionPayload);

/// Metadata describing what ran, plus provider extras.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMetadata {
    /// The program that ran.
    pub action: ActionPayload,
    /// Extras from D-Wave devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dwave_metadata: Option<DwaveMetadata>,
}

impl AdditionalMetadata {
    /// Metadata for `action` with no provider extras.
    pub fn new(action: impl Into<ActionPayload>) -> Self {
        Self {
            action: action.into(),
            dwave_metadata: None,
        }
    }
}

impl Validate for AdditionalMetadata {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let action = fields.field(v, "action");
        let dwave_metadata = fields.field(v, "dwaveMetadata");
        Some(Self {
            action: action?,
            dwave_metadata: dwave_metadata?,
        })
    }
}

deserialize_via_validate!(AdditionalMetadata);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata() -> Value {
        json!({
            "braketSchemaHeader": {"name": "braket.task_result.task_metadata", "version": "1"},
            "id": "arn:aws:braket:us-west-2:1234567890:quantum-task/task-1",
            "shots": 1000,
            "deviceId": "arn:aws:braket:::device/quantum-simulator/amazon/sv1",
            "deviceParameters": {
                "braketSchemaHeader": {
                    "name": "braket.device_schema.simulator_device_parameters",
                    "version": "1"
                },
                "qubitCount": 2
            },
            "createdAt": "2020-01-02T03:04:05.006Z",
            "status": "COMPLETED"
        })
    }

    #[test]
    fn test_task_metadata() {
        let metadata = TaskMetadata::from_value(&metadata()).unwrap();
        assert_eq!(metadata.shots.get(), 1000);
        assert!(matches!(
            metadata.device_parameters,
            Some(DeviceParameters::SimulatorDeviceParameters(_))
        ));
        assert_eq!(metadata.status.as_ref().map(|s| s.as_str()), Some("COMPLETED"));
        assert!(metadata.ended_at.is_none());
    }

    #[test]
    fn test_task_metadata_string_limits() {
        let mut doc = metadata();
        doc["id"] = json!("");
        doc["createdAt"] = json!("2020-01-02T03:04:05.006Z+extra");
        doc["status"] = json!("X".repeat(21));
        doc["failureReason"] = json!("f".repeat(256));
        let errors = TaskMetadata::from_value(&doc).unwrap_err();
        for path in ["id", "createdAt", "status", "failureReason"] {
            assert!(errors.contains(path, ErrorKind::Constraint), "{path} not reported");
        }
    }

    #[test]
    fn test_task_metadata_rejects_foreign_parameters() {
        let mut doc = metadata();
        doc["deviceParameters"] = json!({
            "braketSchemaHeader": {"name": "braket.task_result.dwave_metadata", "version": "1"},
            "activeVariables": [],
            "timing": {}
        });
        let errors = TaskMetadata::from_value(&doc).unwrap_err();
        assert!(errors.contains(
            "deviceParameters.braketSchemaHeader",
            ErrorKind::UnsupportedVariant
        ));
    }

    #[test]
    fn test_action_selected_by_header() {
        let value = json!({
            "action": {
                "braketSchemaHeader": {"name": "braket.ir.annealing.problem", "version": "1"},
                "type": "ISING",
                "linear": {},
                "quadratic": {}
            }
        });
        let metadata = AdditionalMetadata::from_value(&value).unwrap();
        assert!(matches!(metadata.action, ActionPayload::Problem(_)));
    }

    #[test]
    fn test_action_selected_by_shape() {
        let program = json!({"action": {"instructions": [{"type": "x", "target": 0}]}});
        let metadata = AdditionalMetadata::from_value(&program).unwrap();
        assert!(matches!(metadata.action, ActionPayload::Program(_)));
        assert_eq!(metadata.action.schema_header().name(), "braket.ir.jaqcd.program");

        let problem = json!({"action": {"type": "QUBO", "linear": {"0": 1.0}, "quadratic": {}}});
        let metadata = AdditionalMetadata::from_value(&problem).unwrap();
        assert!(matches!(metadata.action, ActionPayload::Problem(_)));
    }

    #[test]
    fn test_action_errors_point_into_selected_variant() {
        let value = json!({"action": {"instructions": [{"type": "cnot", "control": 0}]}});
        let errors = AdditionalMetadata::from_value(&value).unwrap_err();
        assert!(errors.contains("action.instructions[0].target", ErrorKind::Missing));
    }

    #[test]
    fn test_action_unknown() {
        let errors = AdditionalMetadata::from_value(&json!({"action": {"foo": 1}})).unwrap_err();
        assert!(errors.contains("action", ErrorKind::UnsupportedVariant));

        let value = json!({
            "action": {"braketSchemaHeader": {"name": "braket.ir.openqasm.program", "version": "1"}}
        });
        let errors = AdditionalMetadata::from_value(&value).unwrap_err();
        assert!(errors.contains("action.braketSchemaHeader", ErrorKind::UnsupportedVariant));
    }
}
