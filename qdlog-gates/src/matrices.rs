//! Gate matrices
//!
//! Multi-qubit matrices index their rows with the first listed qubit as the
//! most significant bit.

use num_complex::Complex64;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix (NOT gate)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// SWAP gate matrix
/// SWAP = [[1, 0, 0, 0],
///         [0, 0, 1, 0],
///         [0, 1, 0, 0],
///         [0, 0, 0, 1]]
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// Generate phase gate matrix for a given angle
/// P(θ) = [[1, 0     ],
///         [0, e^(iθ)]]
#[inline]
pub fn phase(theta: f64) -> [[Complex64; 2]; 2] {
    [
        [ONE, ZERO],
        [ZERO, Complex64::from_polar(1.0, theta)],
    ]
}

/// Flatten a fixed-size matrix into row-major order
pub fn flatten<const D: usize>(m: &[[Complex64; D]; D]) -> Vec<Complex64> {
    m.iter().flatten().copied().collect()
}

/// Full matrix of `target` (flattened, row-major) with `num_controls`
/// control qubits in front of it
///
/// The result is identity everywhere except the bottom-right block, where all
/// controls are |1⟩.
pub fn controlled(num_controls: usize, target: &[Complex64]) -> Vec<Complex64> {
    let target_dim = (target.len() as f64).sqrt() as usize;
    debug_assert_eq!(target_dim * target_dim, target.len());

    let dim = target_dim << num_controls;
    let offset = dim - target_dim;
    let mut full = vec![ZERO; dim * dim];
    for i in 0..offset {
        full[i * dim + i] = ONE;
    }
    for r in 0..target_dim {
        for c in 0..target_dim {
            full[(offset + r) * dim + offset + c] = target[r * target_dim + c];
        }
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn mul_2x2(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) -> [[Complex64; 2]; 2] {
        let mut result = [[ZERO; 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    result[i][j] += a[i][k] * b[k][j];
                }
            }
        }
        result
    }

    fn assert_matrix_eq(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-10);
                assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_hadamard_self_inverse() {
        assert_matrix_eq(&mul_2x2(&HADAMARD, &HADAMARD), &IDENTITY);
    }

    #[test]
    fn test_pauli_x_squaring() {
        assert_matrix_eq(&mul_2x2(&PAULI_X, &PAULI_X), &IDENTITY);
    }

    #[test]
    fn test_phase_composes_additively() {
        let product = mul_2x2(&phase(PI / 4.0), &phase(PI / 8.0));
        assert_matrix_eq(&product, &phase(3.0 * PI / 8.0));
        assert_matrix_eq(&mul_2x2(&phase(0.7), &phase(-0.7)), &IDENTITY);
    }

    #[test]
    fn test_controlled_builds_cnot() {
        let cnot = controlled(1, &flatten(&PAULI_X));
        assert_eq!(cnot.len(), 16);
        // |10⟩ ↔ |11⟩
        assert_relative_eq!(cnot[2 * 4 + 3].re, 1.0);
        assert_relative_eq!(cnot[3 * 4 + 2].re, 1.0);
        assert_relative_eq!(cnot[2 * 4 + 2].re, 0.0);
        assert_relative_eq!(cnot[0].re, 1.0);
    }

    #[test]
    fn test_controlled_builds_fredkin() {
        let fredkin = controlled(1, &flatten(&SWAP));
        let dim = 8;
        // |101⟩ ↔ |110⟩
        assert_relative_eq!(fredkin[5 * dim + 6].re, 1.0);
        assert_relative_eq!(fredkin[6 * dim + 5].re, 1.0);
        assert_relative_eq!(fredkin[7 * dim + 7].re, 1.0);
        assert_relative_eq!(fredkin[3 * dim + 3].re, 1.0);
    }
}
