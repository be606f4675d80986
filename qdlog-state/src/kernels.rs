//! Controlled gate application kernels
//!
//! Every kernel takes a `control_mask`: the gate acts only on basis states
//! whose index has all mask bits set. A mask of 0 is unconditional.

use num_complex::Complex64;
use rayon::prelude::*;

/// 2×2 operator, row-major
pub type Matrix2x2 = [[Complex64; 2]; 2];

/// 4×4 operator, row-major, first target qubit most significant
pub type Matrix4x4 = [[Complex64; 4]; 4];

#[inline]
fn is_diagonal(gate: &Matrix2x2) -> bool {
    gate[0][1] == Complex64::new(0.0, 0.0) && gate[1][0] == Complex64::new(0.0, 0.0)
}

/// Apply `gate` to `target` wherever every bit of `control_mask` is set
///
/// Diagonal operators (phases) skip the pairwise update and scale
/// amplitudes in place.
pub fn apply_controlled(
    state: &mut [Complex64],
    control_mask: usize,
    target: usize,
    gate: &Matrix2x2,
    parallel: bool,
) {
    if is_diagonal(gate) {
        apply_controlled_diagonal(state, control_mask, target, [gate[0][0], gate[1][1]], parallel);
    } else if parallel {
        apply_controlled_parallel(state, control_mask, 1 << target, gate);
    } else {
        apply_controlled_sequential(state, control_mask, 1 << target, gate);
    }
}

#[inline]
fn apply_controlled_sequential(
    state: &mut [Complex64],
    control_mask: usize,
    target_stride: usize,
    gate: &Matrix2x2,
) {
    let n = state.len();
    let mut i = 0;

    while i < n {
        for j in 0..target_stride {
            let idx0 = i + j;
            if idx0 & control_mask == control_mask {
                let idx1 = idx0 + target_stride;
                let a = state[idx0];
                let b = state[idx1];

                state[idx0] = gate[0][0] * a + gate[0][1] * b;
                state[idx1] = gate[1][0] * a + gate[1][1] * b;
            }
        }
        i += target_stride * 2;
    }
}

#[inline]
fn apply_controlled_parallel(
    state: &mut [Complex64],
    control_mask: usize,
    target_stride: usize,
    gate: &Matrix2x2,
) {
    state
        .par_chunks_mut(target_stride * 2)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let base_idx = chunk_idx * target_stride * 2;

            for j in 0..target_stride {
                if (base_idx + j) & control_mask == control_mask {
                    let a = chunk[j];
                    let b = chunk[j + target_stride];

                    chunk[j] = gate[0][0] * a + gate[0][1] * b;
                    chunk[j + target_stride] = gate[1][0] * a + gate[1][1] * b;
                }
            }
        });
}

fn apply_controlled_diagonal(
    state: &mut [Complex64],
    control_mask: usize,
    target: usize,
    diag: [Complex64; 2],
    parallel: bool,
) {
    let target_mask = 1usize << target;
    let update = |(idx, amp): (usize, &mut Complex64)| {
        if idx & control_mask == control_mask {
            *amp *= if idx & target_mask != 0 { diag[1] } else { diag[0] };
        }
    };

    if parallel {
        state.par_iter_mut().enumerate().for_each(update);
    } else {
        state.iter_mut().enumerate().for_each(update);
    }
}

/// Apply a 4×4 `gate` to qubits `(a, b)` wherever every bit of
/// `control_mask` is set
///
/// Row index of `gate` is `(bit_a << 1) | bit_b`.
pub fn apply_controlled_two_qubit(
    state: &mut [Complex64],
    control_mask: usize,
    a: usize,
    b: usize,
    gate: &Matrix4x4,
    parallel: bool,
) {
    let mask_a = 1usize << a;
    let mask_b = 1usize << b;
    let chunk_len = 1usize << (a.max(b) + 1);

    let update_chunk = |(chunk_idx, chunk): (usize, &mut [Complex64])| {
        let base_idx = chunk_idx * chunk_len;
        for j in 0..chunk.len() {
            if j & (mask_a | mask_b) != 0 || (base_idx + j) & control_mask != control_mask {
                continue;
            }
            let idx = [j, j | mask_b, j | mask_a, j | mask_a | mask_b];
            let amps = idx.map(|i| chunk[i]);
            for (row, &i) in idx.iter().enumerate() {
                chunk[i] = gate[row]
                    .iter()
                    .zip(amps.iter())
                    .map(|(g, amp)| g * amp)
                    .sum();
            }
        }
    };

    if parallel {
        state.par_chunks_mut(chunk_len).enumerate().for_each(update_chunk);
    } else {
        state.chunks_mut(chunk_len).enumerate().for_each(update_chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ZERO: Complex64 = Complex64::new(0.0, 0.0);
    const ONE: Complex64 = Complex64::new(1.0, 0.0);
    const X: Matrix2x2 = [[ZERO, ONE], [ONE, ZERO]];

    fn basis(num_qubits: usize, index: usize) -> Vec<Complex64> {
        let mut state = vec![ZERO; 1 << num_qubits];
        state[index] = ONE;
        state
    }

    fn swap_matrix() -> Matrix4x4 {
        [
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ]
    }

    #[test]
    fn test_uncontrolled_flip() {
        for parallel in [false, true] {
            let mut state = basis(3, 0b000);
            apply_controlled(&mut state, 0, 1, &X, parallel);
            assert_relative_eq!(state[0b010].re, 1.0);
        }
    }

    #[test]
    fn test_multi_control_mask() {
        for parallel in [false, true] {
            // controls on 0 and 2, only one set: nothing happens
            let mut state = basis(3, 0b001);
            apply_controlled(&mut state, 0b101, 1, &X, parallel);
            assert_relative_eq!(state[0b001].re, 1.0);

            let mut state = basis(3, 0b101);
            apply_controlled(&mut state, 0b101, 1, &X, parallel);
            assert_relative_eq!(state[0b111].re, 1.0);
        }
    }

    #[test]
    fn test_diagonal_fast_path() {
        let theta = 0.8;
        let phase = [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]];
        for parallel in [false, true] {
            let mut state = basis(2, 0b11);
            apply_controlled(&mut state, 0b01, 1, &phase, parallel);
            assert_relative_eq!(state[0b11].re, theta.cos(), epsilon = 1e-12);
            assert_relative_eq!(state[0b11].im, theta.sin(), epsilon = 1e-12);

            let mut state = basis(2, 0b10);
            apply_controlled(&mut state, 0b01, 1, &phase, parallel);
            assert_relative_eq!(state[0b10].re, 1.0);
        }
    }

    #[test]
    fn test_controlled_swap() {
        for parallel in [false, true] {
            // control qubit 3, swap qubits 0 and 2
            let mut state = basis(4, 0b1001);
            apply_controlled_two_qubit(&mut state, 0b1000, 0, 2, &swap_matrix(), parallel);
            assert_relative_eq!(state[0b1100].re, 1.0);

            let mut state = basis(4, 0b0001);
            apply_controlled_two_qubit(&mut state, 0b1000, 0, 2, &swap_matrix(), parallel);
            assert_relative_eq!(state[0b0001].re, 1.0);
        }
    }

    #[test]
    fn test_two_qubit_ordering() {
        // CNOT with qubit a as control, b as target, expressed as a 4x4
        let cnot = [
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
            [ZERO, ZERO, ONE, ZERO],
        ];
        let mut state = basis(3, 0b100);
        apply_controlled_two_qubit(&mut state, 0, 2, 0, &cnot, false);
        assert_relative_eq!(state[0b101].re, 1.0);
    }
}
