//! Constant addition in the Fourier basis
//!
//! After `qft(register, false)` line `k` carries the phase `2π·x / 2^(k+1)`.
//! Adding a classical constant `c` only shifts each of those phases by
//! `2π·c / 2^(k+1)`, so the whole adder is one phase rotation per line and
//! wraps modulo `2^width` for free.

use crate::error::{DiscreteLogError, Result};
use qdlog_core::{CircuitBuilder, ControlSet, QubitRegister};
use qdlog_gates::StandardGates;
use std::f64::consts::PI;

/// Per-line phase angles that add `constant` to a `width`-line register
///
/// `angles[k] = π · Σ_{j≤k} c_j · 2^(j-k)` where `c_j` is bit `j` of
/// `constant mod 2^width`. Bits above `k` contribute whole turns and drop
/// out. Negative constants use their two's complement bits, which is the
/// same residue.
pub fn get_angles(constant: i128, width: usize) -> Vec<f64> {
    let bit = |j: usize| ((constant >> j.min(127)) & 1) as f64;
    (0..width)
        .map(|k| {
            let sum: f64 = (0..=k).map(|j| bit(j) * 2f64.powi(j as i32 - k as i32)).sum();
            PI * sum
        })
        .collect()
}

/// Append `register += constant (mod 2^width)` for a register in Fourier form
///
/// With `inverse` the angles are negated, which subtracts instead. Every
/// rotation is conditioned on all of `controls`; an empty set makes the
/// addition unconditional. Appends exactly `width` gates.
pub fn phi_add(
    builder: &mut CircuitBuilder,
    register: QubitRegister,
    constant: i128,
    width: usize,
    controls: &ControlSet,
    inverse: bool,
) -> Result<()> {
    if register.len() != width {
        return Err(DiscreteLogError::register_width("register", width, register.len()));
    }
    if controls.intersects(&register) {
        return Err(DiscreteLogError::RegisterOverlap("controls", "register"));
    }

    let sign = if inverse { -1.0 } else { 1.0 };
    for (k, angle) in get_angles(constant, width).into_iter().enumerate() {
        builder.mcp(sign * angle, controls, register.qubit(k)?)?;
    }
    Ok(())
}
