//! Controlled constant addition modulo N in the Fourier basis

use super::fourier_adder::phi_add;
use super::check_modulus;
use crate::error::{DiscreteLogError, Result};
use qdlog_core::{CircuitBuilder, ControlSet, QubitId, QubitRegister};
use qdlog_gates::StandardGates;

/// Append `register = (register ± constant) mod modulus`, conditioned on `controls`
///
/// `register` has `n + 1` lines in Fourier form and must hold a value below
/// `modulus` on entry; line `n` is scratch for the sign of the speculative
/// subtraction. `aux` is borrowed: it must be 0 on entry and is 0 again on
/// exit. With `inverse` the constant is negated modulo `modulus` first.
///
/// The gate order is fixed:
///
/// 1. add `c` under `controls`
/// 2. subtract `N`
/// 3. leave the Fourier basis, copy the sign line into `aux`, re-enter
/// 4. add `N` back under `aux`
/// 5. subtract `c` under `controls` to expose whether the sum wrapped
/// 6. leave the Fourier basis, clear `aux` from the inverted sign line, re-enter
/// 7. add `c` under `controls`
#[allow(clippy::too_many_arguments)]
pub fn phi_add_mod_n(
    builder: &mut CircuitBuilder,
    register: QubitRegister,
    constant: u64,
    n: usize,
    modulus: u64,
    controls: &ControlSet,
    aux: QubitId,
    inverse: bool,
) -> Result<()> {
    check_modulus(modulus, n)?;
    if controls.is_empty() {
        return Err(DiscreteLogError::MissingControls);
    }
    let width = n + 1;
    if register.len() != width {
        return Err(DiscreteLogError::register_width("register", width, register.len()));
    }
    if register.contains(aux) || controls.contains(aux) {
        return Err(DiscreteLogError::AuxiliaryAliased(aux));
    }

    let reduced = constant % modulus;
    let c = if inverse {
        (modulus - reduced) % modulus
    } else {
        reduced
    };
    let c = c as i128;
    let modulus_i = modulus as i128;
    let sign_line = register.msb()?;
    let unconditional = ControlSet::empty();

    phi_add(builder, register, c, width, controls, false)?;
    phi_add(builder, register, modulus_i, width, &unconditional, true)?;

    builder.iqft(register, false)?;
    builder.cx(sign_line, aux)?;
    builder.qft(register, false)?;

    phi_add(builder, register, modulus_i, width, &ControlSet::single(aux), false)?;
    phi_add(builder, register, c, width, controls, true)?;

    builder.iqft(register, false)?;
    builder.x(sign_line)?;
    builder.cx(sign_line, aux)?;
    builder.x(sign_line)?;
    builder.qft(register, false)?;

    phi_add(builder, register, c, width, controls, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n: usize) -> (CircuitBuilder, QubitRegister, QubitId, ControlSet) {
        let mut builder = CircuitBuilder::new();
        let ctrl = builder.allocate_register("ctrl", 1).unwrap();
        let reg = builder.allocate_register("b", n + 1).unwrap();
        let aux = builder.allocate_register("aux", 1).unwrap();
        let controls = ControlSet::single(ctrl.qubit(0).unwrap());
        (builder, reg, aux.qubit(0).unwrap(), controls)
    }

    #[test]
    fn test_gate_sequence_shape() {
        let (mut builder, reg, aux, controls) = layout(3);
        phi_add_mod_n(&mut builder, reg, 3, 3, 5, &controls, aux, false).unwrap();

        let blocks = builder.blocks().to_vec();
        assert_eq!(blocks.len(), 4);
        let circuit = builder.build().unwrap();
        let counts = circuit.gate_counts();
        // four single-controlled adders plus 6 rotations per transform
        assert_eq!(counts.get("CP"), Some(&(4 * 4 + 4 * 6)));
        assert_eq!(counts.get("P"), Some(&4));
        assert_eq!(counts.get("H"), Some(&16));
        assert_eq!(counts.get("CNOT"), Some(&2));
        assert_eq!(counts.get("X"), Some(&2));
    }

    #[test]
    fn test_modulus_bounds() {
        let (mut builder, reg, aux, controls) = layout(3);
        let too_big = phi_add_mod_n(&mut builder, reg, 1, 3, 8, &controls, aux, false);
        assert!(matches!(too_big, Err(DiscreteLogError::ModulusOutOfRange { .. })));

        let zero = phi_add_mod_n(&mut builder, reg, 1, 3, 0, &controls, aux, false);
        assert!(matches!(zero, Err(DiscreteLogError::ModulusOutOfRange { .. })));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_requires_controls() {
        let (mut builder, reg, aux, _) = layout(3);
        let result = phi_add_mod_n(&mut builder, reg, 1, 3, 5, &ControlSet::empty(), aux, false);
        assert!(matches!(result, Err(DiscreteLogError::MissingControls)));
    }

    #[test]
    fn test_register_width_checked() {
        let (mut builder, reg, aux, controls) = layout(3);
        let result = phi_add_mod_n(&mut builder, reg, 1, 2, 3, &controls, aux, false);
        assert!(matches!(result, Err(DiscreteLogError::RegisterWidth { .. })));
    }

    #[test]
    fn test_aux_must_not_alias() {
        let (mut builder, reg, _, controls) = layout(3);
        let inside = reg.qubit(0).unwrap();
        let result = phi_add_mod_n(&mut builder, reg, 1, 3, 5, &controls, inside, false);
        assert!(matches!(result, Err(DiscreteLogError::AuxiliaryAliased(_))));

        let ctrl = controls.as_slice()[0];
        let result = phi_add_mod_n(&mut builder, reg, 1, 3, 5, &controls, ctrl, false);
        assert!(matches!(result, Err(DiscreteLogError::AuxiliaryAliased(_))));
    }
}
