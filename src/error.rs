//! Schema error types.
//!
//! Errors are categorized by where they arise:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Startup** | `DuplicateSchema` | Fix registration code |
//! | **Dispatch** | `UnknownSchema` | Send a registered header |
//! | **Parse** | `Json` | Send well-formed JSON |
//! | **Validation** | `Validation` | Fix every listed field |
//!
//! None of them is transient: a payload that fails once fails again until it
//! is corrected.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while registering, resolving or validating schemas.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    // ── Startup errors ──────────────────────────────────────────────
    /// Two distinct types tried to register the same header.
    #[error(
        "Schema {name} v{version} is registered to {existing}, cannot register {attempted}"
    )]
    DuplicateSchema {
        /// Schema name.
        name: String,
        /// Schema version.
        version: String,
        /// Type already holding the key.
        existing: &'static str,
        /// Type that attempted to register.
        attempted: &'static str,
    },

    // ── Dispatch errors ─────────────────────────────────────────────
    /// No type is registered for the header.
    #[error("Unknown schema: {name} v{version}")]
    UnknownSchema {
        /// Schema name as declared by the document.
        name: String,
        /// Schema version as declared by the document.
        version: String,
    },

    // ── Input errors ────────────────────────────────────────────────
    /// The input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not satisfy the schema.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

impl SchemaError {
    /// Field violations carried by this error, empty for non-validation errors.
    pub fn violations(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Classification of a single field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is absent or `null`.
    Missing,
    /// The field has the wrong JSON type.
    WrongType,
    /// A numeric range or list/string length constraint failed.
    Constraint,
    /// A string does not match its pattern or literal set.
    Pattern,
    /// A discriminator names a variant that is not in the dispatch table.
    UnsupportedVariant,
    /// A declared schema header differs from the expected one.
    HeaderMismatch,
    /// Sibling fields disagree with each other.
    Inconsistent,
}

/// One violation at one field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the offending field; empty for the document root.
    pub path: String,
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A constrained value rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    /// Violation class.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl ConstraintViolation {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Every violation found in one document.
///
/// Produced by validation only when at least one violation exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// All violations in the order they were found.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check whether no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check whether a violation of `kind` was recorded at `path`.
    pub fn contains(&self, path: &str, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.path == path && e.kind == kind)
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
