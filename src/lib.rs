//! Braket Schemas — versioned JSON contracts for quantum programs, devices
//! and task results.
//!
//! Every document exchanged with a device is a JSON object tagged with a
//! `braketSchemaHeader` (`name`, `version`). This crate owns the Rust type for
//! each header and turns untrusted JSON into fully validated values.
//!
//! # Overview
//!
//! - [`SchemaHeader`] and the [`SchemaRegistry`] mapping headers to types
//! - Constraint primitives ([`NonNegativeInt`], [`BoundedVec`], [`UnitInterval`], ...)
//! - The gate-model IR ([`ir::jaqcd::Program`]) and annealing IR ([`ir::annealing::Problem`])
//! - Device capabilities: generic, IonQ, Rigetti, simulator and D-Wave
//! - Task results: gate-model and annealing
//! - [`SchemaError`] carrying every violation with its field path
//!
//! # Parsing
//!
//! Parsing is two-phase: the text is read as JSON, then the value is walked
//! by [`Validate`], which collects every violation instead of stopping at the
//! first one.
//!
//! ```
//! use braket_schemas::ir::jaqcd::Program;
//! use braket_schemas::validation::Validate;
//!
//! let program = Program::parse_raw(
//!     r#"{"instructions": [{"type": "h", "target": 0}, {"type": "cnot", "control": 0, "target": 1}]}"#,
//! )
//! .unwrap();
//! assert_eq!(program.instructions.len(), 2);
//! ```
//!
//! When the document type is not known up front, dispatch on its header:
//!
//! ```
//! use braket_schemas::{Document, parse_raw_schema};
//!
//! let doc = parse_raw_schema(
//!     r#"{"braketSchemaHeader": {"name": "braket.ir.annealing.problem", "version": "1"},
//!         "type": "QUBO", "linear": {"0": 0.5}, "quadratic": {"0,1": -1.0}}"#,
//! )
//! .unwrap();
//! assert!(matches!(doc, Document::Problem(_)));
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!   JSON text ──→ serde_json::Value ──→ header lookup ──→ Validate ──→ Document
//!    (phase 1: SchemaError::Json)        (UnknownSchema)   (SchemaError::Validation)
//! ```
//!
//! All documents also implement `serde::Serialize` and `serde::Deserialize`;
//! deserialization runs the same validation.

#[macro_use]
mod macros;

pub mod device_schema;
pub mod dispatch;
pub mod error;
pub mod header;
pub mod ir;
pub mod registry;
pub mod task_result;
pub mod validation;

pub use error::{
    ConstraintViolation, ErrorKind, FieldError, SchemaError, SchemaResult, ValidationErrors,
};
pub use header::SchemaHeader;
pub use registry::{Document, SchemaDocument, SchemaRegistry, global, parse_raw_schema};
pub use validation::{
    BoundedInt, BoundedString, BoundedVec, FiniteFloat, NonNegativeInt, UnitInterval, Validate,
};
