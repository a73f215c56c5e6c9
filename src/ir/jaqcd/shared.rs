//! Field shapes shared by instructions and result types.
//!
//! Instructions are compositions of these shapes: `Rx` is an [`Angle`] plus
//! a single target, `Kraus` is a [`MultiTarget`] plus a
//! [`TwoDimensionalMatrixList`], and so on.

use num_complex::Complex64;
use serde::Serialize;
use serde_json::Value;

use crate::validation::{
    Bitstring, BoundedVec, FiniteFloat, NonNegativeInt, UNBOUNDED, UnitInterval, Validate,
    Validator,
};

/// Most Kraus operators in one channel.
pub const MAX_KRAUS_MATRICES: usize = 16;

/// Largest Kraus operator dimension.
pub const MAX_KRAUS_DIMENSION: usize = 4;

/// A qubit index.
pub type Qubit = NonNegativeInt;

/// Exactly two qubit indices.
pub type DoubleTarget = BoundedVec<Qubit, 2, 2>;

/// One or more qubit indices.
pub type MultiTarget = BoundedVec<Qubit, 1, UNBOUNDED>;

/// Targets of a result type; absent means every qubit.
pub type OptionalMultiTarget = Option<MultiTarget>;

/// Exactly two control indices.
pub type DoubleControl = BoundedVec<Qubit, 2, 2>;

/// One or more control indices.
pub type MultiControl = BoundedVec<Qubit, 1, UNBOUNDED>;

/// A rotation angle in radians.
pub type Angle = FiniteFloat;

/// A probability or damping rate.
pub type Probability = UnitInterval;

/// A non-empty matrix of complex entries. Squareness is not checked.
pub type TwoDimensionalMatrix = BoundedVec<BoundedVec<Complex64, 1, UNBOUNDED>, 1, UNBOUNDED>;

/// Up to 16 matrices of at most 4x4 entries each.
pub type TwoDimensionalMatrixList = BoundedVec<
    BoundedVec<BoundedVec<Complex64, 1, MAX_KRAUS_DIMENSION>, 1, MAX_KRAUS_DIMENSION>,
    1,
    MAX_KRAUS_MATRICES,
>;

/// A matrix observable factor: at least 2x2 complex entries.
pub type HermitianMatrix = BoundedVec<BoundedVec<Complex64, 2, UNBOUNDED>, 2, UNBOUNDED>;

/// One or more bitstrings.
pub type MultiState = BoundedVec<Bitstring, 1, UNBOUNDED>;

literal_enum! {
    /// Single-qubit Pauli-like observable token.
    pub enum PauliObservable {
        X = "x",
        Y = "y",
        Z = "z",
        H = "h",
        I = "i",
    }
}

/// One tensor factor of an [`Observable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObservableFactor {
    /// A named single-qubit observable.
    Pauli(PauliObservable),
    /// An explicit matrix.
    Hermitian(HermitianMatrix),
}

impl Validate for ObservableFactor {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        match value {
            Value::String(_) => PauliObservable::validate(value, v).map(Self::Pauli),
            Value::Array(_) => HermitianMatrix::validate(value, v).map(Self::Hermitian),
            other => {
                v.wrong_type("a Pauli token or a matrix", other);
                None
            }
        }
    }
}

/// Tensor product of one or more factors.
pub type Observable = BoundedVec<ObservableFactor, 1, UNBOUNDED>;

/// Qubit indices referenced by a field.
pub trait Operand {
    /// Append the referenced qubits to `out`.
    fn qubits(&self, out: &mut Vec<u64>);
}

impl Operand for NonNegativeInt {
    fn qubits(&self, out: &mut Vec<u64>) {
        out.push(self.get());
    }
}

impl<const MIN: usize, const MAX: usize> Operand for BoundedVec<NonNegativeInt, MIN, MAX> {
    fn qubits(&self, out: &mut Vec<u64>) {
        out.extend(self.iter().map(|q| q.get()));
    }
}

impl<T: Operand> Operand for Option<T> {
    fn qubits(&self, out: &mut Vec<u64>) {
        if let Some(inner) = self {
            inner.qubits(out);
        }
    }
}

macro_rules! no_operands {
    ($($ty:ty),+ $(,)?) => {$(
        impl Operand for $ty {
            fn qubits(&self, _out: &mut Vec<u64>) {}
        }
    )+};
}

no_operands!(
    FiniteFloat,
    UnitInterval,
    TwoDimensionalMatrix,
    TwoDimensionalMatrixList,
    Observable,
    MultiState,
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_double_target() {
        assert!(DoubleTarget::from_value(&json!([0, 1])).is_ok());
        for bad in [json!([1]), json!([]), json!([1, 2, 3]), json!([-1, -2])] {
            assert!(DoubleTarget::from_value(&bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_matrix_list_limits() {
        let identity = json!([[[1, 0], [0, 0]], [[0, 0], [1, 0]]]);
        let sixteen = Value::Array(vec![identity.clone(); 16]);
        assert!(TwoDimensionalMatrixList::from_value(&sixteen).is_ok());

        let seventeen = Value::Array(vec![identity; 17]);
        let errors = TwoDimensionalMatrixList::from_value(&seventeen).unwrap_err();
        assert!(errors.contains("", ErrorKind::Constraint));

        let row = Value::Array(vec![json!([0, 0]); 5]);
        let five_by_five = json!([Value::Array(vec![row; 5])]);
        let errors = TwoDimensionalMatrixList::from_value(&five_by_five).unwrap_err();
        assert!(errors.contains("[0]", ErrorKind::Constraint));
        assert!(errors.contains("[0][0]", ErrorKind::Constraint));
    }

    #[test]
    fn test_matrix_entries_are_complex_pairs() {
        let errors = TwoDimensionalMatrix::from_value(&json!([[[1, 0, 0]]])).unwrap_err();
        assert!(errors.contains("[0][0]", ErrorKind::Constraint));
        assert!(TwoDimensionalMatrix::from_value(&json!([[[1, 0], [0, 1], [2, 2]]])).is_ok());
    }

    #[test]
    fn test_observable_tokens() {
        let observable = Observable::from_value(&json!(["x"])).unwrap();
        assert_eq!(observable[0], ObservableFactor::Pauli(PauliObservable::X));
        assert!(Observable::from_value(&json!(["x", "z", "i"])).is_ok());

        let errors = Observable::from_value(&json!(["q"])).unwrap_err();
        assert!(errors.contains("[0]", ErrorKind::Pattern));
        assert!(Observable::from_value(&json!([])).is_err());
    }

    #[test]
    fn test_observable_hermitian_matrix() {
        let observable =
            Observable::from_value(&json!([[[[0, 0], [1, 0]], [[1, 0], [0, 0]]]])).unwrap();
        assert!(matches!(observable[0], ObservableFactor::Hermitian(ref m) if m.len() == 2));

        assert!(Observable::from_value(&json!([[[[1, 0]]]])).is_err());
        let errors = Observable::from_value(&json!([7])).unwrap_err();
        assert!(errors.contains("[0]", ErrorKind::WrongType));
    }

    #[test]
    fn test_observable_serializes_as_sent() {
        let input = json!(["z", [[[0, 0], [1, 0]], [[1, 0], [0, 0]]]]);
        let observable = Observable::from_value(&input).unwrap();
        let output = serde_json::to_value(&observable).unwrap();
        assert_eq!(Observable::from_value(&output).unwrap(), observable);
        assert_eq!(output[0], json!("z"));
    }

    #[test]
    fn test_multi_state() {
        assert!(MultiState::from_value(&json!(["0", "0101"])).is_ok());
        assert!(MultiState::from_value(&json!([])).is_err());
        let errors = MultiState::from_value(&json!(["01", "2"])).unwrap_err();
        assert!(errors.contains("[1]", ErrorKind::Pattern));
    }
}
