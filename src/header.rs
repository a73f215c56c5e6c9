//! Self-describing schema headers.
//!
//! Every top-level document carries a `braketSchemaHeader`:
//!
//! ```json
//! { "braketSchemaHeader": { "name": "braket.ir.jaqcd.program", "version": "1" } }
//! ```
//!
//! The `(name, version)` pair is the key into the
//! [`SchemaRegistry`](crate::registry::SchemaRegistry).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConstraintViolation, ErrorKind};
use crate::validation::{BoundedString, Fields, UNBOUNDED, Validate, Validator};

/// Identifies the shape of a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SchemaHeader {
    name: String,
    version: String,
}

impl SchemaHeader {
    /// JSON member holding the header.
    pub const FIELD: &'static str = "braketSchemaHeader";

    /// Create a header, rejecting an empty name or a non-integer version.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ConstraintViolation> {
        let name = name.into();
        let version = version.into();
        if name.is_empty() {
            return Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                "schema name must not be empty",
            ));
        }
        if !is_version(&version) {
            return Err(version_violation(&version));
        }
        Ok(Self { name, version })
    }

    /// Header of a built-in schema type.
    pub(crate) fn canonical(name: &'static str, version: &'static str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Dotted schema name, e.g. `braket.ir.jaqcd.program`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Integer version string, e.g. `"1"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Read the header from a document.
    pub fn of(document: &Value) -> Option<Self> {
        let mut v = Validator::new();
        let fields = Fields::of(document, &mut v)?;
        let header = fields.field::<Self>(&mut v, Self::FIELD);
        v.finish(header).ok()
    }
}

fn is_version(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn version_violation(version: &str) -> ConstraintViolation {
    ConstraintViolation::new(
        ErrorKind::Pattern,
        format!("version must be an integer string, found `{version}`"),
    )
}

impl fmt::Display for SchemaHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

impl Validate for SchemaHeader {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let name: Option<BoundedString<1, UNBOUNDED>> = fields.field(v, "name");
        let version = fields.field_with(
            v,
            "version",
            || None,
            |value, v| {
                let version = String::validate(value, v)?;
                if is_version(&version) {
                    Some(version)
                } else {
                    v.reject(version_violation(&version));
                    None
                }
            },
        );
        Some(Self {
            name: name?.as_str().to_string(),
            version: version?,
        })
    }
}

deserialize_via_validate!(SchemaHeader);
