//! Field constraint primitives.
//!
//! Each primitive pairs a predicate with an error message and checks it when
//! the value is constructed, either through `new` or through [`Validate`].
//! A constructed value is valid for its whole lifetime: the types expose no
//! mutation.
//!
//! | Primitive | Predicate |
//! |-----------|-----------|
//! | [`NonNegativeInt`] | `v >= 0` |
//! | [`BoundedInt`] | `MIN <= v <= MAX` |
//! | [`FiniteFloat`] | `-inf < v < inf` |
//! | [`UnitInterval`] | `0 <= v <= 1` |
//! | [`BoundedVec`] | `MIN <= len <= MAX` |
//! | [`BoundedString`] | `MIN <= chars <= MAX` |
//! | [`PatternString`] | matches a [`StringPattern`] |

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{MapKey, Validate, Validator};
use crate::error::{ConstraintViolation, ErrorKind};

/// Upper bound meaning "no limit" for [`BoundedVec`] and [`BoundedString`].
pub const UNBOUNDED: usize = usize::MAX;

impl Validator {
    /// Record a rejected constrained value at the current path.
    pub fn reject(&mut self, violation: ConstraintViolation) {
        self.report(violation.kind, violation.message);
    }
}

// ──────────────────────────────────────────────────────────────────────
// Integers
// ──────────────────────────────────────────────────────────────────────

/// An integer `>= 0`. Used for qubit indices, counts and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NonNegativeInt(u64);

impl NonNegativeInt {
    /// Create a value, rejecting negatives.
    pub fn new(value: i64) -> Result<Self, ConstraintViolation> {
        u64::try_from(value).map(Self).map_err(|_| {
            ConstraintViolation::new(ErrorKind::Constraint, format!("must be >= 0, got {value}"))
        })
    }

    /// The wrapped value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u32> for NonNegativeInt {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl From<u64> for NonNegativeInt {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NonNegativeInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Validate for NonNegativeInt {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        if let Some(n) = value.as_u64() {
            return Some(Self(n));
        }
        match value.as_i64() {
            Some(n) => Self::new(n).map_err(|e| v.reject(e)).ok(),
            None => {
                v.wrong_type("an integer", value);
                None
            }
        }
    }
}

impl MapKey for NonNegativeInt {
    fn parse_key(key: &str, v: &mut Validator) -> Option<Self> {
        if let Ok(n) = key.parse::<u64>() {
            return Some(Self(n));
        }
        match key.parse::<i64>() {
            Ok(n) => Self::new(n).map_err(|e| v.reject(e)).ok(),
            Err(_) => {
                v.report(
                    ErrorKind::Pattern,
                    format!("key `{key}` is not a non-negative integer"),
                );
                None
            }
        }
    }
}

/// An integer in the closed range `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedInt<const MIN: i64, const MAX: i64>(i64);

impl<const MIN: i64, const MAX: i64> BoundedInt<MIN, MAX> {
    /// Create a value, rejecting anything outside `[MIN, MAX]`.
    pub fn new(value: i64) -> Result<Self, ConstraintViolation> {
        if (MIN..=MAX).contains(&value) {
            Ok(Self(value))
        } else if MAX == i64::MAX {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must be >= {MIN}, got {value}"),
            ))
        } else {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must be between {MIN} and {MAX}, got {value}"),
            ))
        }
    }

    /// The wrapped value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<const MIN: i64, const MAX: i64> Validate for BoundedInt<MIN, MAX> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value.as_i64() {
            Some(n) => Self::new(n).map_err(|e| v.reject(e)).ok(),
            None if value.is_u64() => {
                v.report(
                    ErrorKind::Constraint,
                    format!("must be between {MIN} and {MAX}, got {value}"),
                );
                None
            }
            None => {
                v.wrong_type("an integer", value);
                None
            }
        }
    }
}

// ──────────────────────────────────────────────────────────────────────
// Floats
// ──────────────────────────────────────────────────────────────────────

/// A float that is neither infinite nor NaN. Used for angles and matrix entries.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FiniteFloat(f64);

impl FiniteFloat {
    /// Create a value, rejecting `inf`, `-inf` and `NaN`.
    pub fn new(value: f64) -> Result<Self, ConstraintViolation> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must be finite, got {value}"),
            ))
        }
    }

    /// The wrapped value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Validate for FiniteFloat {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let x = f64::validate(value, v)?;
        Self::new(x).map_err(|e| v.reject(e)).ok()
    }
}

/// A float in `[0, 1]`. Used for probabilities and damping rates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct UnitInterval(f64);

impl UnitInterval {
    /// Create a value, rejecting anything outside `[0, 1]` and `NaN`.
    pub fn new(value: f64) -> Result<Self, ConstraintViolation> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must be between 0 and 1, got {value}"),
            ))
        }
    }

    /// The wrapped value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Validate for UnitInterval {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let x = f64::validate(value, v)?;
        Self::new(x).map_err(|e| v.reject(e)).ok()
    }
}

// ──────────────────────────────────────────────────────────────────────
// Lists
// ──────────────────────────────────────────────────────────────────────

/// A homogeneous list whose length lies in `[MIN, MAX]`.
///
/// `BoundedVec<T, 2, 2>` is a fixed pair; `BoundedVec<T, 1, UNBOUNDED>` is a
/// non-empty list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedVec<T, const MIN: usize, const MAX: usize>(Vec<T>);

impl<T, const MIN: usize, const MAX: usize> BoundedVec<T, MIN, MAX> {
    /// Create a list, rejecting a length outside `[MIN, MAX]`.
    pub fn new(items: Vec<T>) -> Result<Self, ConstraintViolation> {
        Self::check_len(items.len())?;
        Ok(Self(items))
    }

    fn check_len(len: usize) -> Result<(), ConstraintViolation> {
        if (MIN..=MAX).contains(&len) {
            return Ok(());
        }
        let expected = if MIN == MAX {
            format!("exactly {MIN}")
        } else if MAX == UNBOUNDED {
            format!("at least {MIN}")
        } else if MIN == 0 {
            format!("at most {MAX}")
        } else {
            format!("between {MIN} and {MAX}")
        };
        Err(ConstraintViolation::new(
            ErrorKind::Constraint,
            format!("expected {expected} item(s), found {len}"),
        ))
    }

    /// Consume the list.
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const MIN: usize, const MAX: usize> Deref for BoundedVec<T, MIN, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T, const MIN: usize, const MAX: usize> IntoIterator for &'a BoundedVec<T, MIN, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Validate, const MIN: usize, const MAX: usize> Validate for BoundedVec<T, MIN, MAX> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let Value::Array(items) = value else {
            v.wrong_type("a list", value);
            return None;
        };
        let len_ok = Self::check_len(items.len()).map_err(|e| v.reject(e)).is_ok();
        let items = Vec::<T>::validate(value, v);
        if !len_ok {
            return None;
        }
        items.map(Self)
    }
}

// ──────────────────────────────────────────────────────────────────────
// Strings
// ──────────────────────────────────────────────────────────────────────

/// A string whose character count lies in `[MIN, MAX]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedString<const MIN: usize, const MAX: usize>(String);

impl<const MIN: usize, const MAX: usize> BoundedString<MIN, MAX> {
    /// Create a string, rejecting a length outside `[MIN, MAX]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ConstraintViolation> {
        let value = value.into();
        let len = value.chars().count();
        if (MIN..=MAX).contains(&len) {
            Ok(Self(value))
        } else if MAX == UNBOUNDED {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must have at least {MIN} character(s), found {len}"),
            ))
        } else {
            Err(ConstraintViolation::new(
                ErrorKind::Constraint,
                format!("must have between {MIN} and {MAX} characters, found {len}"),
            ))
        }
    }

    /// The wrapped string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const MIN: usize, const MAX: usize> Validate for BoundedString<MIN, MAX> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let s = String::validate(value, v)?;
        Self::new(s).map_err(|e| v.reject(e)).ok()
    }
}

/// A predicate over strings, standing in for a regular expression.
pub trait StringPattern {
    /// The pattern as shown in error messages.
    const PATTERN: &'static str;

    /// Whether `s` matches the whole pattern.
    fn matches(s: &str) -> bool;
}

/// A string matching the pattern `P`.
pub struct PatternString<P> {
    value: String,
    _pattern: PhantomData<P>,
}

impl<P: StringPattern> PatternString<P> {
    /// Create a string, rejecting it when it does not match `P`.
    pub fn new(value: impl Into<String>) -> Result<Self, ConstraintViolation> {
        let value = value.into();
        if P::matches(&value) {
            Ok(Self {
                value,
                _pattern: PhantomData,
            })
        } else {
            Err(ConstraintViolation::new(
                ErrorKind::Pattern,
                format!("`{value}` does not match `{}`", P::PATTERN),
            ))
        }
    }

    /// The wrapped string.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<P> fmt::Debug for PatternString<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<P> fmt::Display for PatternString<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<P> Clone for PatternString<P> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _pattern: PhantomData,
        }
    }
}

impl<P> PartialEq for PatternString<P> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<P> Eq for PatternString<P> {}

impl<P> PartialOrd for PatternString<P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for PatternString<P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<P> Serialize for PatternString<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<P: StringPattern> Validate for PatternString<P> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let s = String::validate(value, v)?;
        Self::new(s).map_err(|e| v.reject(e)).ok()
    }
}

impl<P: StringPattern> MapKey for PatternString<P> {
    fn parse_key(key: &str, v: &mut Validator) -> Option<Self> {
        Self::new(key).map_err(|e| v.reject(e)).ok()
    }
}

/// `^[01]+$`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitstringPattern;

impl StringPattern for BitstringPattern {
    const PATTERN: &'static str = "^[01]+$";

    fn matches(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b == b'0' || b == b'1')
    }
}

/// `^\d+,\d+$`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouplerPattern;

impl StringPattern for CouplerPattern {
    const PATTERN: &'static str = r"^\d+,\d+$";

    fn matches(s: &str) -> bool {
        let Some((a, b)) = s.split_once(',') else {
            return false;
        };
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        digits(a) && digits(b)
    }
}

/// A measurement outcome such as `"0110"`.
pub type Bitstring = PatternString<BitstringPattern>;

/// An annealing coupler key such as `"0,4"`.
pub type CouplerKey = PatternString<CouplerPattern>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_negative_boundaries() {
        assert_eq!(NonNegativeInt::new(0).unwrap().get(), 0);
        assert!(NonNegativeInt::new(-1).is_err());
        let errors = NonNegativeInt::from_value(&json!(-1)).unwrap_err();
        assert!(errors.contains("", ErrorKind::Constraint));
        let errors = NonNegativeInt::from_value(&json!(1.5)).unwrap_err();
        assert!(errors.contains("", ErrorKind::WrongType));
    }

    #[test]
    fn test_bounded_int() {
        type Spin = BoundedInt<-1, 3>;
        assert!(Spin::new(-1).is_ok());
        assert!(Spin::new(3).is_ok());
        assert!(Spin::new(-2).is_err());
        assert!(Spin::from_value(&json!(500)).is_err());
        assert!(Spin::from_value(&json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_finite_float() {
        assert!(FiniteFloat::new(0.15).is_ok());
        assert!(FiniteFloat::new(f64::INFINITY).is_err());
        assert!(FiniteFloat::new(f64::NEG_INFINITY).is_err());
        assert!(FiniteFloat::new(f64::NAN).is_err());
    }

    #[test]
    fn test_unit_interval_boundaries() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(UnitInterval::new(1.000_000_1).is_err());
        assert!(UnitInterval::new(-0.000_000_1).is_err());
        assert!(UnitInterval::new(f64::NAN).is_err());
    }

    #[test]
    fn test_bounded_vec_fixed_length() {
        type Pair = BoundedVec<NonNegativeInt, 2, 2>;
        assert!(Pair::from_value(&json!([0, 1])).is_ok());
        assert!(Pair::from_value(&json!([1])).is_err());
        assert!(Pair::from_value(&json!([])).is_err());
        assert!(Pair::from_value(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_bounded_vec_reports_length_and_items() {
        type Pair = BoundedVec<NonNegativeInt, 2, 2>;
        let errors = Pair::from_value(&json!([-1, -2, -3])).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains("", ErrorKind::Constraint));
        assert!(errors.contains("[2]", ErrorKind::Constraint));
    }

    #[test]
    fn test_bounded_string() {
        type Id = BoundedString<1, 4>;
        assert!(Id::new("abcd").is_ok());
        assert!(Id::new("").is_err());
        assert!(Id::new("abcde").is_err());
    }

    #[test]
    fn test_bitstring_pattern() {
        assert!(Bitstring::new("0101").is_ok());
        assert!(Bitstring::new("").is_err());
        assert!(Bitstring::new("012").is_err());
        let errors = Bitstring::from_value(&json!("10a")).unwrap_err();
        assert!(errors.contains("", ErrorKind::Pattern));
    }

    #[test]
    fn test_coupler_pattern() {
        assert!(CouplerKey::new("0,4").is_ok());
        assert!(CouplerKey::new("12,345").is_ok());
        assert!(CouplerKey::new("0,").is_err());
        assert!(CouplerKey::new("a,1").is_err());
        assert!(CouplerKey::new("1,2,3").is_err());
    }

    #[test]
    fn test_map_key_non_negative() {
        let mut v = Validator::new();
        assert_eq!(NonNegativeInt::parse_key("7", &mut v), Some(NonNegativeInt::from(7u32)));
        assert_eq!(NonNegativeInt::parse_key("-7", &mut v), None);
        assert_eq!(NonNegativeInt::parse_key("x", &mut v), None);
        assert_eq!(v.error_count(), 2);
    }
}
