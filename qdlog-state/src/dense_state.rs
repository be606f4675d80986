//! Dense quantum state representation

use crate::error::{Result, StateError};
use crate::kernels::{self, Matrix2x2, Matrix4x4};
use num_complex::Complex64;
use std::fmt;

/// Default qubit count at which kernels switch to rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 14;

/// Dense quantum state representation
///
/// Holds all `2^n` amplitudes. Qubit `q` corresponds to bit `q` of the basis
/// index, so a register occupying qubits `start..start+len` reads as an
/// ordinary little-endian integer.
///
/// # Example
///
/// ```
/// use qdlog_state::DenseState;
///
/// let state = DenseState::new(3).unwrap();
/// assert_eq!(state.num_qubits(), 3);
/// assert_eq!(state.dimension(), 8);
/// assert!(state.is_normalized(1e-10));
/// ```
#[derive(Clone)]
pub struct DenseState {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
    parallel_threshold: usize,
}

impl DenseState {
    /// Create a new dense state initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or too large to address
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// Create the computational basis state |index⟩
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits >= usize::BITS as usize {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        let dimension = 1usize << num_qubits;
        if index >= dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: index,
            });
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Create a dense state from amplitude data
    ///
    /// # Errors
    /// Returns error if the slice length is not `2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        if amplitudes.len() != state.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: state.dimension(),
                actual: amplitudes.len(),
            });
        }
        state.amplitudes.copy_from_slice(amplitudes);
        Ok(state)
    }

    /// Set the qubit count at which kernels go parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Compute the norm of the state
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Check if the state is normalized (|norm - 1| < epsilon)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Normalize the state to have unit norm
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(StateError::NotNormalized { norm });
        }
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        Ok(())
    }

    /// Probability of measuring basis state `index`
    pub fn get_probability(&self, index: usize) -> Result<f64> {
        self.amplitudes
            .get(index)
            .map(|a| a.norm_sqr())
            .ok_or(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: index,
            })
    }

    /// Probabilities of every basis state
    pub fn get_all_probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    #[inline]
    fn use_parallel(&self) -> bool {
        self.num_qubits >= self.parallel_threshold
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_mask(&self, control_mask: usize, targets: &[usize]) -> Result<()> {
        if control_mask >> self.num_qubits != 0 {
            return Err(StateError::InvalidQubitIndex {
                index: (usize::BITS - control_mask.leading_zeros() - 1) as usize,
                num_qubits: self.num_qubits,
            });
        }
        for &target in targets {
            self.check_qubit(target)?;
            if control_mask & (1 << target) != 0 {
                return Err(StateError::OverlappingQubits { qubit: target });
            }
        }
        Ok(())
    }

    /// Apply a single-qubit gate to the state
    ///
    /// # Errors
    /// Returns error if qubit index is invalid
    pub fn apply_single_qubit_gate(&mut self, matrix: &Matrix2x2, qubit: usize) -> Result<()> {
        self.apply_controlled_gate(0, qubit, matrix)
    }

    /// Apply a single-qubit gate to `target`, conditioned on every qubit in
    /// `control_mask` being |1⟩
    ///
    /// # Errors
    /// Returns error if a qubit is out of range or the target is also a
    /// control
    pub fn apply_controlled_gate(
        &mut self,
        control_mask: usize,
        target: usize,
        matrix: &Matrix2x2,
    ) -> Result<()> {
        self.check_mask(control_mask, &[target])?;
        let parallel = self.use_parallel();
        kernels::apply_controlled(&mut self.amplitudes, control_mask, target, matrix, parallel);
        Ok(())
    }

    /// Apply a two-qubit gate to `(a, b)`, conditioned on every qubit in
    /// `control_mask` being |1⟩
    ///
    /// `a` is the most significant qubit of the matrix index.
    pub fn apply_controlled_two_qubit_gate(
        &mut self,
        control_mask: usize,
        a: usize,
        b: usize,
        matrix: &Matrix4x4,
    ) -> Result<()> {
        self.check_mask(control_mask, &[a, b])?;
        if a == b {
            return Err(StateError::OverlappingQubits { qubit: a });
        }
        let parallel = self.use_parallel();
        kernels::apply_controlled_two_qubit(&mut self.amplitudes, control_mask, a, b, matrix, parallel);
        Ok(())
    }

    /// Outcome distribution of measuring only `qubits`
    ///
    /// Entry `k` of the result is the probability that `qubits[i]` reads
    /// bit `i` of `k` for every `i`.
    pub fn marginal_probabilities(&self, qubits: &[usize]) -> Result<Vec<f64>> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        let mut marginal = vec![0.0; 1 << qubits.len()];
        for (idx, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            marginal[extract_bits(idx, qubits)] += p;
        }
        Ok(marginal)
    }

    /// Value held by `qubits` if the state is a single basis state
    ///
    /// Returns `None` when no basis state carries probability within
    /// `epsilon` of 1.
    pub fn basis_state_of(&self, qubits: &[usize], epsilon: f64) -> Option<usize> {
        self.amplitudes
            .iter()
            .position(|a| (a.norm_sqr() - 1.0).abs() < epsilon)
            .map(|idx| extract_bits(idx, qubits))
    }
}

/// Gather bits `qubits[i]` of `index` into bit `i` of the result
#[inline]
pub fn extract_bits(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &q)| acc | (((index >> q) & 1) << i))
}

impl fmt::Debug for DenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseState")
            .field("num_qubits", &self.num_qubits)
            .field("norm", &self.norm())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ZERO: Complex64 = Complex64::new(0.0, 0.0);
    const ONE: Complex64 = Complex64::new(1.0, 0.0);
    const X: Matrix2x2 = [[ZERO, ONE], [ONE, ZERO]];

    fn hadamard() -> Matrix2x2 {
        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        [[h, h], [h, -h]]
    }

    #[test]
    fn test_new_state() {
        let state = DenseState::new(2).unwrap();
        assert_eq!(state.dimension(), 4);
        assert_relative_eq!(state.get_probability(0).unwrap(), 1.0);
        assert!(DenseState::new(0).is_err());
    }

    #[test]
    fn test_basis_state() {
        let state = DenseState::basis_state(3, 0b101).unwrap();
        assert_eq!(state.basis_state_of(&[0, 1, 2], 1e-9), Some(0b101));
        assert_eq!(state.basis_state_of(&[2, 0], 1e-9), Some(0b11));
        assert!(DenseState::basis_state(2, 4).is_err());
    }

    #[test]
    fn test_bell_marginals() {
        let mut state = DenseState::new(3).unwrap();
        state.apply_single_qubit_gate(&hadamard(), 0).unwrap();
        state.apply_controlled_gate(0b001, 2, &X).unwrap();

        let marginal = state.marginal_probabilities(&[0, 2]).unwrap();
        assert_relative_eq!(marginal[0b00], 0.5, epsilon = 1e-12);
        assert_relative_eq!(marginal[0b11], 0.5, epsilon = 1e-12);
        assert_relative_eq!(marginal[0b01], 0.0, epsilon = 1e-12);
        assert_eq!(state.basis_state_of(&[0], 1e-9), None);
    }

    #[test]
    fn test_invalid_qubits() {
        let mut state = DenseState::new(2).unwrap();
        assert!(matches!(
            state.apply_single_qubit_gate(&X, 2),
            Err(StateError::InvalidQubitIndex { index: 2, .. })
        ));
        assert!(matches!(
            state.apply_controlled_gate(0b100, 0, &X),
            Err(StateError::InvalidQubitIndex { index: 2, .. })
        ));
        assert!(matches!(
            state.apply_controlled_gate(0b01, 0, &X),
            Err(StateError::OverlappingQubits { qubit: 0 })
        ));
        assert!(state.marginal_probabilities(&[5]).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let run = |threshold: usize| {
            let mut state = DenseState::new(5).unwrap().with_parallel_threshold(threshold);
            for q in 0..5 {
                state.apply_single_qubit_gate(&hadamard(), q).unwrap();
            }
            let phase = [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, 0.3)]];
            state.apply_controlled_gate(0b00011, 4, &phase).unwrap();
            state.apply_controlled_gate(0b10000, 2, &X).unwrap();
            state
        };

        let sequential = run(usize::MAX);
        let parallel = run(0);
        for (a, b) in sequential.amplitudes().iter().zip(parallel.amplitudes()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
        assert!(parallel.is_normalized(1e-10));
    }

    #[test]
    fn test_normalize() {
        let amps = vec![Complex64::new(3.0, 0.0), Complex64::new(4.0, 0.0)];
        let mut state = DenseState::from_amplitudes(1, &amps).unwrap();
        state.normalize().unwrap();
        assert_relative_eq!(state.get_probability(1).unwrap(), 0.64, epsilon = 1e-12);
    }
}
