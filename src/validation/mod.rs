//! Two-phase document construction.
//!
//! Phase one is plain JSON parsing into a [`serde_json::Value`]. Phase two
//! walks the value with a [`Validator`], which tracks the current field path
//! and collects every violation instead of stopping at the first one:
//!
//! ```text
//!   &str ──serde_json──→ Value ──Validate::validate──→ T
//!                                        │
//!                                        └──→ ValidationErrors (all fields)
//! ```
//!
//! Every schema type implements [`Validate`]. Composite types read their
//! members through [`Fields`] so that each member is validated even when a
//! sibling has already failed.

pub mod constraints;

use std::collections::BTreeMap;

use chrono::NaiveTime;
use num_complex::Complex64;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, FieldError, SchemaResult, ValidationErrors};
use crate::header::SchemaHeader;

pub use constraints::{
    Bitstring, BoundedInt, BoundedString, BoundedVec, CouplerKey, FiniteFloat, NonNegativeInt,
    PatternString, StringPattern, UNBOUNDED, UnitInterval,
};

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Collects violations while walking a JSON value.
#[derive(Debug, Default)]
pub struct Validator {
    path: Vec<Segment>,
    errors: ValidationErrors,
}

impl Validator {
    /// Create a validator positioned at the document root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the path extended by an object key.
    pub fn at_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(Segment::Key(key.to_string()));
        let out = f(self);
        self.path.pop();
        out
    }

    /// Run `f` with the path extended by a list index.
    pub fn at_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(Segment::Index(index));
        let out = f(self);
        self.path.pop();
        out
    }

    /// Record a violation at the current path.
    pub fn report(&mut self, kind: ErrorKind, message: impl Into<String>) {
        let path = self.current_path();
        self.errors.push(FieldError {
            path,
            kind,
            message: message.into(),
        });
    }

    /// Record a type mismatch at the current path.
    pub fn wrong_type(&mut self, expected: &str, found: &Value) {
        self.report(
            ErrorKind::WrongType,
            format!("expected {expected}, found {}", json_type(found)),
        );
    }

    /// Number of violations recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Render the current path, e.g. `instructions[3].targets[0]`.
    pub fn current_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    if key.contains('.') {
                        out.push('"');
                        out.push_str(key);
                        out.push('"');
                    } else {
                        out.push_str(key);
                    }
                }
                Segment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Turn the outcome of a validation walk into a result.
    ///
    /// A value is only returned when no violation was recorded anywhere.
    pub fn finish<T>(mut self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => {
                if self.errors.is_empty() {
                    self.report(ErrorKind::Constraint, "invalid value");
                }
                Err(self.errors)
            }
        }
    }
}

/// A type that can be constructed from a JSON value, with validation.
///
/// `validate` returns `None` exactly when it recorded at least one violation.
pub trait Validate: Sized {
    /// Validate `value` and build `Self`, reporting violations to `v`.
    fn validate(value: &Value, v: &mut Validator) -> Option<Self>;

    /// Value to use when the field is absent or `null`; `None` means required.
    fn missing() -> Option<Self> {
        None
    }

    /// Whether serialization should omit this value.
    fn is_absent(&self) -> bool {
        false
    }

    /// Validate an already parsed JSON value.
    fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();
        let out = Self::validate(value, &mut v);
        v.finish(out)
    }

    /// Parse and validate raw JSON text.
    fn parse_raw(json: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }
}

/// `skip_serializing_if` helper for fields typed with [`Validate`].
pub(crate) fn is_absent<T: Validate>(value: &T) -> bool {
    value.is_absent()
}

/// Read access to the members of a JSON object.
///
/// Unknown members are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// View `value` as an object, reporting a type error otherwise.
    pub fn of(value: &'a Value, v: &mut Validator) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { map }),
            other => {
                v.wrong_type("an object", other);
                None
            }
        }
    }

    /// Raw member, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    /// Whether the member is present and not `null`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Validate member `key` as `T`.
    pub fn field<T: Validate>(&self, v: &mut Validator, key: &str) -> Option<T> {
        self.field_with(v, key, T::missing, T::validate)
    }

    /// Validate member `key` with a custom parser.
    pub fn field_with<T>(
        &self,
        v: &mut Validator,
        key: &str,
        missing: impl FnOnce() -> Option<T>,
        parse: impl FnOnce(&Value, &mut Validator) -> Option<T>,
    ) -> Option<T> {
        match self.get(key) {
            Some(value) => v.at_key(key, |v| parse(value, v)),
            None => {
                let default = missing();
                if default.is_none() {
                    v.at_key(key, |v| v.report(ErrorKind::Missing, "field required"));
                }
                default
            }
        }
    }

    /// Check an optional literal discriminator such as `"type": "cnot"`.
    ///
    /// Absent is accepted; any other value is a violation.
    pub fn literal(&self, v: &mut Validator, key: &str, expected: &str) -> bool {
        match self.get(key) {
            None => true,
            Some(Value::String(found)) if found == expected => true,
            Some(other) => {
                v.at_key(key, |v| {
                    v.report(
                        ErrorKind::Pattern,
                        format!("expected literal `{expected}`, found {other}"),
                    )
                });
                false
            }
        }
    }

    /// Validate `braketSchemaHeader` against the header the caller expects.
    ///
    /// An absent header takes the expected value.
    pub fn header(&self, v: &mut Validator, expected: &SchemaHeader) -> Option<SchemaHeader> {
        let found: SchemaHeader = self.field_with(
            v,
            SchemaHeader::FIELD,
            || Some(expected.clone()),
            SchemaHeader::validate,
        )?;
        if &found != expected {
            v.at_key(SchemaHeader::FIELD, |v| {
                v.report(
                    ErrorKind::HeaderMismatch,
                    format!("expected {expected}, found {found}"),
                )
            });
            return None;
        }
        Some(found)
    }
}

/// Name of the JSON type of `value`, for error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

// ──────────────────────────────────────────────────────────────────────
// Leaf implementations
// ──────────────────────────────────────────────────────────────────────

impl Validate for bool {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            other => {
                v.wrong_type("a boolean", other);
                None
            }
        }
    }
}

impl Validate for f64 {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value.as_f64() {
            Some(x) => Some(x),
            None => {
                v.wrong_type("a number", value);
                None
            }
        }
    }
}

impl Validate for i64 {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value.as_i64() {
            Some(x) => Some(x),
            None => {
                v.wrong_type("an integer", value);
                None
            }
        }
    }
}

impl Validate for String {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                v.wrong_type("a string", other);
                None
            }
        }
    }
}

impl Validate for Value {
    fn validate(value: &Value, _v: &mut Validator) -> Option<Self> {
        Some(value.clone())
    }
}

impl Validate for NaiveTime {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let text = String::validate(value, v)?;
        match text.parse::<NaiveTime>() {
            Ok(time) => Some(time),
            Err(e) => {
                v.report(ErrorKind::Pattern, format!("invalid time `{text}`: {e}"));
                None
            }
        }
    }
}

/// A complex number is a list of exactly two finite floats, `[re, im]`.
impl Validate for Complex64 {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let parts = BoundedVec::<FiniteFloat, 2, 2>::validate(value, v)?;
        Some(Complex64::new(parts[0].get(), parts[1].get()))
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::validate(value, v).map(Some)
    }

    fn missing() -> Option<Self> {
        Some(None)
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let Value::Array(items) = value else {
            v.wrong_type("a list", value);
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match v.at_index(i, |v| T::validate(item, v)) {
                Some(parsed) => out.push(parsed),
                None => ok = false,
            }
        }
        ok.then_some(out)
    }
}

/// Types usable as JSON object keys.
pub trait MapKey: Sized + Ord {
    /// Parse a key, reporting violations at the key's path.
    fn parse_key(key: &str, v: &mut Validator) -> Option<Self>;
}

impl MapKey for String {
    fn parse_key(key: &str, _v: &mut Validator) -> Option<Self> {
        Some(key.to_string())
    }
}

impl<K: MapKey, T: Validate> Validate for BTreeMap<K, T> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let mut out = BTreeMap::new();
        let mut ok = true;
        for (key, item) in fields.map {
            let parsed = v.at_key(key, |v| {
                let k = K::parse_key(key, v);
                let t = T::validate(item, v);
                Some((k?, t?))
            });
            match parsed {
                Some((k, t)) => {
                    out.insert(k, t);
                }
                None => ok = false,
            }
        }
        ok.then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_path_rendering() {
        let mut v = Validator::new();
        v.at_key("action", |v| {
            v.at_key("braket.ir.jaqcd.program", |v| {
                v.at_key("supportedOperations", |v| {
                    v.at_index(2, |v| v.report(ErrorKind::WrongType, "bad"))
                })
            })
        });
        let errors = v.finish::<()>(None).unwrap_err();
        assert_eq!(
            errors.as_slice()[0].path,
            "action.\"braket.ir.jaqcd.program\".supportedOperations[2]"
        );
    }

    #[test]
    fn test_vec_collects_every_bad_item() {
        let errors = Vec::<NonNegativeInt>::from_value(&json!([-1, 0, "a", -3])).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("[0]", ErrorKind::Constraint));
        assert!(errors.contains("[2]", ErrorKind::WrongType));
        assert!(errors.contains("[3]", ErrorKind::Constraint));
    }

    #[test]
    fn test_optional_accepts_null() {
        let parsed = Option::<bool>::from_value(&Value::Null).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_missing_required_field() {
        let value = json!({"a": true});
        let mut v = Validator::new();
        let fields = Fields::of(&value, &mut v).unwrap();
        let a: Option<bool> = fields.field(&mut v, "a");
        let b: Option<bool> = fields.field(&mut v, "b");
        assert_eq!(a, Some(true));
        assert_eq!(b, None);
        let errors = v.finish(b).unwrap_err();
        assert!(errors.contains("b", ErrorKind::Missing));
    }

    #[test]
    fn test_null_is_treated_as_missing() {
        let value = json!({"b": null});
        let mut v = Validator::new();
        let fields = Fields::of(&value, &mut v).unwrap();
        let b: Option<bool> = fields.field(&mut v, "b");
        let errors = v.finish(b).unwrap_err();
        assert!(errors.contains("b", ErrorKind::Missing));
    }

    #[test]
    fn test_literal_discriminator() {
        let value = json!({"type": "cnot"});
        let mut v = Validator::new();
        let fields = Fields::of(&value, &mut v).unwrap();
        assert!(fields.literal(&mut v, "type", "cnot"));
        assert!(!fields.literal(&mut v, "type", "cz"));
        assert_eq!(v.error_count(), 1);
    }

    #[test]
    fn test_complex_entry() {
        let c = Complex64::from_value(&json!([0.5, -1.0])).unwrap();
        assert_eq!(c, Complex64::new(0.5, -1.0));
        assert!(Complex64::from_value(&json!([0.5])).is_err());
        assert!(Complex64::from_value(&json!([0.5, 1.0, 2.0])).is_err());
    }

    #[test]
    fn test_time_parsing() {
        let t = NaiveTime::from_value(&json!("08:30:00")).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let errors = NaiveTime::from_value(&json!("25:00:00")).unwrap_err();
        assert!(errors.contains("", ErrorKind::Pattern));
    }

    #[test]
    fn test_map_reports_key_paths() {
        let errors =
            BTreeMap::<String, NonNegativeInt>::from_value(&json!({"a": 1, "b": -1})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("b", ErrorKind::Constraint));
    }
}
