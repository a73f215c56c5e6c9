//! Gate and noise-channel instructions.
//!
//! Every instruction is a flat object whose `type` member selects the
//! variant:
//!
//! ```json
//! {"type": "rx", "angle": 0.15, "target": 1}
//! {"type": "kraus", "targets": [0], "matrices": [[[[1, 0], [0, 0]], [[0, 0], [1, 0]]]]}
//! ```

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use super::shared::{
    Angle, DoubleControl, DoubleTarget, MultiTarget, Operand, Probability, Qubit,
    TwoDimensionalMatrix, TwoDimensionalMatrixList,
};
use crate::dispatch::DispatchTable;
use crate::validation::{Fields, Validate, Validator};

tagged_family! {
    /// One gate or noise-channel operation.
    pub enum Instruction: "instruction" in INSTRUCTIONS {
        // ── Gates ───────────────────────────────────────────────────
        /// Toffoli gate.
        CCNot = "ccnot" { controls: DoubleControl, target: Qubit },
        /// Controlled NOT gate.
        CNot = "cnot" { control: Qubit, target: Qubit },
        /// Controlled phase shift gate.
        CPhaseShift = "cphaseshift" { angle: Angle, control: Qubit, target: Qubit },
        /// Controlled phase shift on `|00>`.
        CPhaseShift00 = "cphaseshift00" { angle: Angle, control: Qubit, target: Qubit },
        /// Controlled phase shift on `|01>`.
        CPhaseShift01 = "cphaseshift01" { angle: Angle, control: Qubit, target: Qubit },
        /// Controlled phase shift on `|10>`.
        CPhaseShift10 = "cphaseshift10" { angle: Angle, control: Qubit, target: Qubit },
        /// Controlled swap gate.
        CSwap = "cswap" { control: Qubit, targets: DoubleTarget },
        /// Controlled Y gate.
        CY = "cy" { control: Qubit, target: Qubit },
        /// Controlled Z gate.
        CZ = "cz" { control: Qubit, target: Qubit },
        /// Hadamard gate.
        H = "h" { target: Qubit },
        /// Identity gate.
        I = "i" { target: Qubit },
        /// iSwap gate.
        ISwap = "iswap" { targets: DoubleTarget },
        /// Phase shift gate.
        PhaseShift = "phaseshift" { angle: Angle, target: Qubit },
        /// Parameterized swap gate.
        PSwap = "pswap" { angle: Angle, targets: DoubleTarget },
        /// X-axis rotation.
        Rx = "rx" { angle: Angle, target: Qubit },
        /// Y-axis rotation.
        Ry = "ry" { angle: Angle, target: Qubit },
        /// Z-axis rotation.
        Rz = "rz" { angle: Angle, target: Qubit },
        /// S gate.
        S = "s" { target: Qubit },
        /// Conjugate transpose of S.
        Si = "si" { target: Qubit },
        /// Swap gate.
        Swap = "swap" { targets: DoubleTarget },
        /// T gate.
        T = "t" { target: Qubit },
        /// Conjugate transpose of T.
        Ti = "ti" { target: Qubit },
        /// Arbitrary unitary over the targets.
        Unitary = "unitary" { targets: MultiTarget, matrix: TwoDimensionalMatrix },
        /// Square root of X.
        V = "v" { target: Qubit },
        /// Conjugate transpose of V.
        Vi = "vi" { target: Qubit },
        /// Pauli X gate.
        X = "x" { target: Qubit },
        /// Ising XX coupling.
        XX = "xx" { angle: Angle, targets: DoubleTarget },
        /// XY coupling.
        XY = "xy" { angle: Angle, targets: DoubleTarget },
        /// Pauli Y gate.
        Y = "y" { target: Qubit },
        /// Ising YY coupling.
        YY = "yy" { angle: Angle, targets: DoubleTarget },
        /// Pauli Z gate.
        Z = "z" { target: Qubit },
        /// Ising ZZ coupling.
        ZZ = "zz" { angle: Angle, targets: DoubleTarget },

        // ── Noise channels ──────────────────────────────────────────
        /// Bit flip with the given probability.
        BitFlip = "bit_flip" { target: Qubit, probability: Probability },
        /// Phase flip with the given probability.
        PhaseFlip = "phase_flip" { target: Qubit, probability: Probability },
        /// Single-qubit depolarizing channel.
        Depolarizing = "depolarizing" { target: Qubit, probability: Probability },
        /// Two-qubit depolarizing channel.
        TwoQubitDepolarizing = "two_qubit_depolarizing" {
            targets: DoubleTarget,
            probability: Probability,
        },
        /// Two-qubit dephasing channel.
        TwoQubitDephasing = "two_qubit_dephasing" {
            targets: DoubleTarget,
            probability: Probability,
        },
        /// Amplitude damping with rate `gamma`.
        AmplitudeDamping = "amplitude_damping" { target: Qubit, gamma: Probability },
        /// Phase damping with rate `gamma`.
        PhaseDamping = "phase_damping" { target: Qubit, gamma: Probability },
        /// Pauli channel. The three probabilities are not required to sum to
        /// at most one.
        PauliChannel = "pauli_channel" {
            target: Qubit,
            prob_x as "probX": Probability,
            prob_y as "probY": Probability,
            prob_z as "probZ": Probability,
        },
        /// General channel given by its Kraus operators.
        Kraus = "kraus" { targets: MultiTarget, matrices: TwoDimensionalMatrixList },
    }
}

impl Instruction {
    /// Check whether this variant is a noise channel rather than a gate.
    pub fn is_noise(&self) -> bool {
        matches!(
            self,
            Self::BitFlip(_)
                | Self::PhaseFlip(_)
                | Self::Depolarizing(_)
                | Self::TwoQubitDepolarizing(_)
                | Self::TwoQubitDephasing(_)
                | Self::AmplitudeDamping(_)
                | Self::PhaseDamping(_)
                | Self::PauliChannel(_)
                | Self::Kraus(_)
        )
    }
}
