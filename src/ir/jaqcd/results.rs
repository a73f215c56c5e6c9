//! Requested result types.

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use super::shared::{MultiState, Observable, OptionalMultiTarget, Operand};
use crate::dispatch::DispatchTable;
use crate::validation::{Fields, Validate, Validator};

tagged_family! {
    /// A measurement-side quantity requested from a program run.
    pub enum ResultType: "result type" in RESULT_TYPES {
        /// Amplitudes of the given basis states.
        Amplitude = "amplitude" { states: MultiState },
        /// Expectation value of an observable.
        Expectation = "expectation" {
            observable: Observable,
            #[serde(skip_serializing_if = "crate::validation::is_absent")]
            targets: OptionalMultiTarget,
        },
        /// Probabilities of the computational basis states.
        Probability = "probability" {
            #[serde(skip_serializing_if = "crate::validation::is_absent")]
            targets: OptionalMultiTarget,
        },
        /// Samples of an observable.
        Sample = "sample" {
            observable: Observable,
            #[serde(skip_serializing_if = "crate::validation::is_absent")]
            targets: OptionalMultiTarget,
        },
        /// The full state vector.
        StateVector = "statevector" {},
        /// Variance of an observable.
        Variance = "variance" {
            observable: Observable,
            #[serde(skip_serializing_if = "crate::validation::is_absent")]
            targets: OptionalMultiTarget,
        },
    }
}
