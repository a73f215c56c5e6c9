//! Action properties: which program formats a device runs.
//!
//! The `action` member of a capabilities document maps an action type to its
//! properties. Each value repeats its key in `actionType`, which also selects
//! the variant:
//!
//! ```json
//! "action": {
//!   "braket.ir.jaqcd.program": {
//!     "actionType": "braket.ir.jaqcd.program",
//!     "version": ["1"],
//!     "supportedOperations": ["x", "cnot"]
//!   }
//! }
//! ```

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::DispatchTable;
use crate::error::ErrorKind;
use crate::ir::jaqcd::{Instruction, Program};
use crate::validation::{Fields, NonNegativeInt, Validate, Validator};

literal_enum! {
    /// Program format accepted by a device.
    pub enum DeviceActionType {
        /// Gate-model circuits.
        Jaqcd = "braket.ir.jaqcd.program",
        /// Annealing problems.
        Annealing = "braket.ir.annealing.problem",
    }
}

/// Properties that carry their own action type.
pub trait ActionEntry {
    /// The `actionType` member.
    fn action_type(&self) -> DeviceActionType;
}

/// Minimal action properties: a format and its supported versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActionProperties {
    /// Program format these properties describe.
    pub action_type: DeviceActionType,
    /// Supported versions of the format.
    pub version: Vec<String>,
}

impl ActionEntry for DeviceActionProperties {
    fn action_type(&self) -> DeviceActionType {
        self.action_type
    }
}

impl Validate for DeviceActionProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let action_type = fields.field(v, "actionType");
        let version = fields.field(v, "version");
        Some(Self {
            action_type: action_type?,
            version: version?,
        })
    }
}

/// Limits on one supported result type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTypeProperties {
    /// Result type name.
    pub name: String,
    /// Observables the result type accepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observables: Option<Vec<String>>,
    /// Fewest shots the result type needs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_shots: Option<NonNegativeInt>,
    /// Most shots the result type allows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_shots: Option<NonNegativeInt>,
}

impl Validate for ResultTypeProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let name = fields.field(v, "name");
        let observables = fields.field(v, "observables");
        let min_shots: Option<Option<NonNegativeInt>> = fields.field(v, "minShots");
        let max_shots: Option<Option<NonNegativeInt>> = fields.field(v, "maxShots");
        if let (Some(Some(min)), Some(Some(max))) = (min_shots, max_shots) {
            if min > max {
                v.at_key("maxShots", |v| {
                    v.report(
                        ErrorKind::Inconsistent,
                        format!("maxShots {max} is below minShots {min}"),
                    )
                });
                return None;
            }
        }
        Some(Self {
            name: name?,
            observables: observables?,
            min_shots: min_shots?,
            max_shots: max_shots?,
        })
    }
}

/// Action properties of the gate-model circuit format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JaqcdDeviceActionProperties {
    /// Always the gate-model circuit format.
    pub action_type: DeviceActionType,
    /// Supported versions of the format.
    pub version: Vec<String>,
    /// Instruction types the device executes.
    pub supported_operations: Vec<String>,
    /// Result types the device can return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_result_types: Option<Vec<ResultTypeProperties>>,
}

impl JaqcdDeviceActionProperties {
    /// Check if an operation is supported, ignoring case.
    pub fn supports_operation(&self, name: &str) -> bool {
        self.supported_operations
            .iter()
            .any(|op| op.eq_ignore_ascii_case(name))
    }

    /// Check if a result type is supported, ignoring case.
    pub fn supports_result_type(&self, name: &str) -> bool {
        self.supported_result_types
            .iter()
            .flatten()
            .any(|rt| rt.name.eq_ignore_ascii_case(name))
    }

    /// Instruction types in `program` that this device does not execute.
    ///
    /// Each type is listed once, in order of first appearance.
    pub fn unsupported_operations(&self, program: &Program) -> Vec<&'static str> {
        let rotations = program.basis_rotation_instructions.iter().flatten();
        let mut missing = Vec::new();
        for name in program
            .instructions
            .iter()
            .chain(rotations)
            .map(Instruction::type_name)
        {
            if !self.supports_operation(name) && !missing.contains(&name) {
                missing.push(name);
            }
        }
        missing
    }
}

impl ActionEntry for JaqcdDeviceActionProperties {
    fn action_type(&self) -> DeviceActionType {
        self.action_type
    }
}

impl Validate for JaqcdDeviceActionProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let tagged = fields.literal(v, "actionType", DeviceActionType::Jaqcd.as_str());
        let version = fields.field(v, "version");
        let supported_operations = fields.field(v, "supportedOperations");
        let supported_result_types = fields.field(v, "supportedResultTypes");
        if !tagged {
            return None;
        }
        Some(Self {
            action_type: DeviceActionType::Jaqcd,
            version: version?,
            supported_operations: supported_operations?,
            supported_result_types: supported_result_types?,
        })
    }
}

/// Any action properties, selected by `actionType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionProperties {
    /// Gate-model circuits with their supported operations.
    Jaqcd(JaqcdDeviceActionProperties),
    /// Annealing problems.
    Annealing(DeviceActionProperties),
}

impl ActionEntry for ActionProperties {
    fn action_type(&self) -> DeviceActionType {
        match self {
            Self::Jaqcd(inner) => inner.action_type(),
            Self::Annealing(inner) => inner.action_type(),
        }
    }
}

static ACTIONS: LazyLock<DispatchTable<ActionProperties>> = LazyLock::new(|| {
    DispatchTable::new(
        "actionType",
        "action type",
        &[
            (DeviceActionType::Jaqcd.as_str(), |value: &Value, v: &mut Validator| {
                JaqcdDeviceActionProperties::validate(value, v).map(ActionProperties::Jaqcd)
            }),
            (DeviceActionType::Annealing.as_str(), |value: &Value, v: &mut Validator| {
                DeviceActionProperties::validate(value, v).map(ActionProperties::Annealing)
            }),
        ],
    )
});

impl ActionProperties {
    /// The dispatch table over `actionType`.
    pub fn table() -> &'static DispatchTable<Self> {
        &ACTIONS
    }
}

impl Validate for ActionProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        ACTIONS.parse(value, v)
    }
}

deserialize_via_validate!(
    DeviceActionProperties,
    ResultTypeProperties,
    JaqcdDeviceActionProperties,
    ActionProperties,
);
