//! Standard quantum gate implementations

use crate::matrices;
use num_complex::Complex64;
use qdlog_core::gate::Gate;
use std::sync::Arc;

/// Helper macro to implement the matrix() method for gates
macro_rules! impl_matrix_method {
    ($gate_type:ty, $matrix_fn:expr, $size:expr) => {
        impl $gate_type {
            /// Returns the pre-computed gate matrix
            #[inline]
            pub const fn matrix() -> &'static [[Complex64; $size]; $size] {
                $matrix_fn
            }

            /// Returns the matrix as a flattened vector (for Gate trait)
            #[inline]
            fn matrix_vec() -> Vec<Complex64> {
                matrices::flatten(Self::matrix())
            }
        }
    };
}

// ============================================================================
// Single-Qubit Gates
// ============================================================================

/// Hadamard gate
///
/// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
#[derive(Debug, Clone, Copy)]
pub struct Hadamard;

impl Gate for Hadamard {
    fn name(&self) -> &str {
        "H"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(Self::matrix_vec())
    }
}

impl_matrix_method!(Hadamard, &matrices::HADAMARD, 2);

/// Pauli-X gate (NOT gate)
///
/// Bit flip: X|0⟩ = |1⟩, X|1⟩ = |0⟩
#[derive(Debug, Clone, Copy)]
pub struct PauliX;

impl Gate for PauliX {
    fn name(&self) -> &str {
        "X"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(Self::matrix_vec())
    }
}

impl_matrix_method!(PauliX, &matrices::PAULI_X, 2);

/// Phase gate P(θ) = diag(1, e^(iθ))
///
/// The only rotation the Fourier-basis adders need; addition of a classical
/// constant becomes one phase per register line.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    theta: f64,
}

impl Phase {
    /// Creates a new Phase gate with the given angle
    pub const fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Returns the phase angle
    pub const fn angle(&self) -> f64 {
        self.theta
    }

    /// Phase gate with the opposite angle
    pub fn inverse(&self) -> Self {
        Self::new(-self.theta)
    }
}

impl Gate for Phase {
    fn name(&self) -> &str {
        "P"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn description(&self) -> String {
        format!("P({:.4})", self.theta)
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(&matrices::phase(self.theta)))
    }
}

// ============================================================================
// Two- and Three-Qubit Gates
// ============================================================================

/// CNOT gate: flips the target (second qubit) when the control is |1⟩
#[derive(Debug, Clone, Copy)]
pub struct CNot;

impl Gate for CNot {
    fn name(&self) -> &str {
        "CNOT"
    }

    fn num_qubits(&self) -> usize {
        2
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::controlled(1, &matrices::flatten(&matrices::PAULI_X)))
    }

    fn num_controls(&self) -> usize {
        1
    }

    fn target_matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(&matrices::PAULI_X))
    }
}

/// SWAP gate: exchanges the states of two qubits
#[derive(Debug, Clone, Copy)]
pub struct Swap;

impl Gate for Swap {
    fn name(&self) -> &str {
        "SWAP"
    }

    fn num_qubits(&self) -> usize {
        2
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(Self::matrix_vec())
    }
}

impl_matrix_method!(Swap, &matrices::SWAP, 4);

/// Fredkin gate (CSWAP): swaps the last two qubits when the first is |1⟩
#[derive(Debug, Clone, Copy)]
pub struct Fredkin;

impl Gate for Fredkin {
    fn name(&self) -> &str {
        "CSWAP"
    }

    fn num_qubits(&self) -> usize {
        3
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::controlled(1, &Swap::matrix_vec()))
    }

    fn num_controls(&self) -> usize {
        1
    }

    fn target_matrix(&self) -> Option<Vec<Complex64>> {
        Some(Swap::matrix_vec())
    }
}

/// Computational-basis measurement of one qubit
///
/// Measurements are terminal: the simulator reads them out after the
/// unitary part of the circuit and refuses any gate on a measured line.
#[derive(Debug, Clone, Copy)]
pub struct Measure;

impl Gate for Measure {
    fn name(&self) -> &str {
        "MEASURE"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_unitary(&self) -> bool {
        false
    }
}

// ============================================================================
// Multi-Controlled Wrapper
// ============================================================================

/// `base` with extra control qubits placed in front of its own qubits
///
/// The gate fires only when every added control is |1⟩. Controls nest: a
/// `Controlled` around a `CNot` reports the CNOT's control as well, so the
/// simulator always sees a single target operator.
///
/// # Example
/// ```
/// use qdlog_core::Gate;
/// use qdlog_gates::{Controlled, Phase};
/// use std::sync::Arc;
///
/// let ccp = Controlled::new(Arc::new(Phase::new(0.5)), 2);
/// assert_eq!(ccp.name(), "CCP");
/// assert_eq!(ccp.num_qubits(), 3);
/// assert_eq!(ccp.num_controls(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Controlled {
    base: Arc<dyn Gate>,
    extra_controls: usize,
    name: String,
}

impl Controlled {
    pub fn new(base: Arc<dyn Gate>, extra_controls: usize) -> Self {
        let name = match extra_controls {
            0 => base.name().to_string(),
            1 => format!("C{}", base.name()),
            2 => format!("CC{}", base.name()),
            k => format!("C{}{}", k, base.name()),
        };
        Self {
            base,
            extra_controls,
            name,
        }
    }

    /// The wrapped gate
    pub fn base(&self) -> &Arc<dyn Gate> {
        &self.base
    }
}

impl Gate for Controlled {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.base.num_qubits() + self.extra_controls
    }

    fn is_unitary(&self) -> bool {
        self.base.is_unitary()
    }

    fn is_hermitian(&self) -> bool {
        self.base.is_hermitian()
    }

    fn description(&self) -> String {
        format!("{} controls on {}", self.extra_controls, self.base.description())
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        self.base
            .matrix()
            .map(|m| matrices::controlled(self.extra_controls, &m))
    }

    fn num_controls(&self) -> usize {
        self.extra_controls + self.base.num_controls()
    }

    fn target_matrix(&self) -> Option<Vec<Complex64>> {
        self.base.target_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_phase_matrix() {
        let m = Phase::new(PI / 2.0).matrix().unwrap();
        assert_relative_eq!(m[0].re, 1.0);
        assert_relative_eq!(m[3].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(m[3].im, 1.0, epsilon = 1e-12);
        assert_relative_eq!(Phase::new(0.3).inverse().angle(), -0.3);
    }

    #[test]
    fn test_controlled_names() {
        let p: Arc<dyn Gate> = Arc::new(Phase::new(0.1));
        assert_eq!(Controlled::new(p.clone(), 1).name(), "CP");
        assert_eq!(Controlled::new(p.clone(), 2).name(), "CCP");
        assert_eq!(Controlled::new(p, 3).name(), "C3P");
    }

    #[test]
    fn test_controlled_nests_controls() {
        let ccx = Controlled::new(Arc::new(CNot), 1);
        assert_eq!(ccx.num_qubits(), 3);
        assert_eq!(ccx.num_controls(), 2);
        assert_eq!(ccx.target_matrix().unwrap(), matrices::flatten(&matrices::PAULI_X));
    }

    #[test]
    fn test_controlled_full_matrix() {
        let cp = Controlled::new(Arc::new(Phase::new(PI)), 1);
        let m = cp.matrix().unwrap();
        assert_eq!(m.len(), 16);
        assert_relative_eq!(m[15].re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(m[10].re, 1.0);
    }

    #[test]
    fn test_measure_is_not_unitary() {
        assert!(!Measure.is_unitary());
        assert!(Measure.matrix().is_none());
        assert!(Measure.target_matrix().is_none());
    }

    #[test]
    fn test_fredkin_splits_control() {
        assert_eq!(Fredkin.num_controls(), 1);
        assert_eq!(Fredkin.target_matrix().unwrap().len(), 16);
        assert_eq!(Fredkin.matrix().unwrap().len(), 64);
    }
}
