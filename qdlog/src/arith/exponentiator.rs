//! Modular exponentiation controlled by an exponent register

use super::check_modulus;
use super::multiplier::multiply_mod_n;
use crate::error::{DiscreteLogError, Result};
use crate::ntheory::mod_mul;
use qdlog_core::{CircuitBuilder, QubitRegister};
use tracing::debug;

/// Append `target = target · base^exponent mod modulus`
///
/// Exponent line `i` controls one multiplication by `base^(2^i) mod modulus`;
/// the classical running base is squared after each line. `exponent` has `m`
/// lines, `target` has `n` and `aux_block` has `n + 2` lines of zeros which
/// are returned as zeros.
///
/// `target` is normally prepared as 1. Any initial value below `modulus`
/// works the same way, since every multiplier only assumes its input is a
/// residue. `base` must be invertible modulo `modulus`.
#[allow(clippy::too_many_arguments)]
pub fn power_mod_n(
    builder: &mut CircuitBuilder,
    exponent: QubitRegister,
    target: QubitRegister,
    base: u64,
    m: usize,
    n: usize,
    modulus: u64,
    aux_block: QubitRegister,
) -> Result<()> {
    check_modulus(modulus, n)?;
    if exponent.len() != m {
        return Err(DiscreteLogError::register_width("exponent", m, exponent.len()));
    }
    if exponent.overlaps(&target) {
        return Err(DiscreteLogError::RegisterOverlap("exponent", "target"));
    }
    if exponent.overlaps(&aux_block) {
        return Err(DiscreteLogError::RegisterOverlap("exponent", "aux"));
    }

    let start = builder.num_operations();
    let mut running = base % modulus;
    for line in exponent.qubits() {
        multiply_mod_n(builder, target, running, n, modulus, line, aux_block)?;
        running = mod_mul(running, running, modulus);
    }
    debug!(
        base,
        modulus,
        exponent = %exponent,
        target = %target,
        gates = builder.num_operations() - start,
        "modular exponentiation appended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_multiplier_per_exponent_line() {
        let mut builder = CircuitBuilder::new();
        let x = builder.allocate_register("x", 2).unwrap();
        let target = builder.allocate_register("target", 3).unwrap();
        let aux = builder.allocate_register("aux", 5).unwrap();

        power_mod_n(&mut builder, x, target, 3, 2, 3, 7, aux).unwrap();

        let circuit = builder.build().unwrap();
        assert_eq!(circuit.gate_counts().get("CSWAP"), Some(&(2 * 3)));
    }

    #[test]
    fn test_empty_exponent_appends_nothing() {
        let mut builder = CircuitBuilder::new();
        let x = builder.allocate_register("x", 2).unwrap();
        let target = builder.allocate_register("target", 3).unwrap();
        let aux = builder.allocate_register("aux", 5).unwrap();

        power_mod_n(&mut builder, x.slice(0..0).unwrap(), target, 3, 0, 3, 7, aux).unwrap();
        assert!(builder.is_empty());

        // a zero-width view starting inside the target is still disjoint from it
        let inside = target.slice(1..1).unwrap();
        power_mod_n(&mut builder, inside, target, 3, 0, 3, 7, aux).unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn test_rejects_overlapping_registers() {
        let mut builder = CircuitBuilder::new();
        let target = builder.allocate_register("target", 3).unwrap();
        let aux = builder.allocate_register("aux", 5).unwrap();

        let result = power_mod_n(&mut builder, target, target, 3, 3, 3, 7, aux);
        assert!(matches!(result, Err(DiscreteLogError::RegisterOverlap(..))));
    }

    #[test]
    fn test_non_invertible_base() {
        let mut builder = CircuitBuilder::new();
        let x = builder.allocate_register("x", 1).unwrap();
        let target = builder.allocate_register("target", 3).unwrap();
        let aux = builder.allocate_register("aux", 5).unwrap();

        let result = power_mod_n(&mut builder, x, target, 2, 1, 3, 6, aux);
        assert!(matches!(result, Err(DiscreteLogError::NotInvertible { .. })));
    }
}
