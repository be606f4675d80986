//! Controlled in-place multiplication by a classical constant modulo N

use super::check_modulus;
use super::modular_adder::phi_add_mod_n;
use crate::error::{DiscreteLogError, Result};
use crate::ntheory::{mod_inverse, mod_mul};
use qdlog_core::{CircuitBuilder, ControlSet, QubitId, QubitRegister};
use qdlog_gates::StandardGates;
use tracing::trace;

/// `2^i mod modulus` for `i` in `0..n`
fn powers_of_two(n: usize, modulus: u64) -> Vec<u64> {
    let mut powers = Vec::with_capacity(n);
    let mut current = 1 % modulus;
    for _ in 0..n {
        powers.push(current);
        current = mod_mul(current, 2, modulus);
    }
    powers
}

/// Append `register = constant · register mod modulus` when `control` is 1
///
/// `register` has `n` lines and must hold a value below `modulus`.
/// `aux_block` has `n + 2` lines, all 0 on entry and on exit: the first
/// `n + 1` accumulate the product, the last one is the modular adder's
/// borrowed sign line. `constant` must be invertible modulo `modulus`, since
/// the accumulator is cleared by subtracting `constant⁻¹` times the product.
///
/// When `control` is 0 nothing changes.
#[allow(clippy::too_many_arguments)]
pub fn multiply_mod_n(
    builder: &mut CircuitBuilder,
    register: QubitRegister,
    constant: u64,
    n: usize,
    modulus: u64,
    control: QubitId,
    aux_block: QubitRegister,
) -> Result<()> {
    check_modulus(modulus, n)?;
    if register.len() != n {
        return Err(DiscreteLogError::register_width("register", n, register.len()));
    }
    if aux_block.len() != n + 2 {
        return Err(DiscreteLogError::register_width("aux", n + 2, aux_block.len()));
    }
    if register.overlaps(&aux_block) {
        return Err(DiscreteLogError::RegisterOverlap("register", "aux"));
    }
    if register.contains(control) || aux_block.contains(control) {
        return Err(DiscreteLogError::AuxiliaryAliased(control));
    }

    let constant = constant % modulus;
    let inverse = mod_inverse(constant, modulus).ok_or(DiscreteLogError::NotInvertible {
        value: constant,
        modulus,
    })?;
    trace!(constant, inverse, modulus, %control, "controlled multiplication");

    let accumulator = aux_block.slice(0..n + 1)?;
    let sign_aux = aux_block.qubit(n + 1)?;
    let powers = powers_of_two(n, modulus);

    let controls_for = |i: usize| -> Result<ControlSet> {
        Ok(ControlSet::from_qubits(&[control, register.qubit(i)?])?)
    };

    builder.qft(accumulator, false)?;
    for (i, &power) in powers.iter().enumerate() {
        let addend = mod_mul(power, constant, modulus);
        phi_add_mod_n(builder, accumulator, addend, n, modulus, &controls_for(i)?, sign_aux, false)?;
    }
    builder.iqft(accumulator, false)?;

    for i in 0..n {
        builder.cswap(control, register.qubit(i)?, accumulator.qubit(i)?)?;
    }

    builder.qft(accumulator, false)?;
    for (i, &power) in powers.iter().enumerate().rev() {
        let addend = mod_mul(power, inverse, modulus);
        phi_add_mod_n(builder, accumulator, addend, n, modulus, &controls_for(i)?, sign_aux, true)?;
    }
    builder.iqft(accumulator, false)?;
    Ok(())
}
