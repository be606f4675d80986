//! Gate dispatch onto the state-vector kernels

use crate::error::{Result, SimulatorError};
use num_complex::Complex64;
use qdlog_core::{Circuit, GateOp};
use qdlog_state::{DenseState, Matrix2x2, Matrix4x4};

/// Apply every unitary operation of `circuit` to `state`
///
/// Returns the measured lines in measurement order. Measurements must be
/// terminal: once a line is measured no later operation may touch it, and a
/// line cannot be measured twice.
pub fn execute(circuit: &Circuit, state: &mut DenseState) -> Result<Vec<usize>> {
    let mut measured: Vec<usize> = Vec::new();
    let mut measured_mask = 0usize;

    for (gate_index, op) in circuit.operations().enumerate() {
        if let Some(&qubit) = op.qubits().iter().find(|q| measured_mask & q.mask() != 0) {
            return Err(SimulatorError::MidCircuitMeasurement {
                gate_index,
                qubit: qubit.index(),
            });
        }

        if !op.gate().is_unitary() {
            for qubit in op.qubits() {
                measured.push(qubit.index());
                measured_mask |= qubit.mask();
            }
            continue;
        }

        apply_op(gate_index, op, state)?;
    }

    Ok(measured)
}

fn apply_op(gate_index: usize, op: &GateOp, state: &mut DenseState) -> Result<()> {
    let fail = |reason: String| SimulatorError::GateApplicationFailed { gate_index, reason };

    let control_mask = op.controls().iter().fold(0usize, |mask, q| mask | q.mask());
    let targets = op.targets();
    let matrix = op
        .gate()
        .target_matrix()
        .ok_or_else(|| fail(format!("gate '{}' has no target matrix", op.gate().name())))?;

    match (targets, matrix.len()) {
        ([target], 4) => {
            let m: Matrix2x2 = [[matrix[0], matrix[1]], [matrix[2], matrix[3]]];
            state.apply_controlled_gate(control_mask, target.index(), &m)?;
        }
        ([a, b], 16) => {
            let mut m: Matrix4x4 = [[Complex64::new(0.0, 0.0); 4]; 4];
            for (r, row) in m.iter_mut().enumerate() {
                row.copy_from_slice(&matrix[r * 4..r * 4 + 4]);
            }
            state.apply_controlled_two_qubit_gate(control_mask, a.index(), b.index(), &m)?;
        }
        _ => {
            return Err(fail(format!(
                "unsupported operator of size {} on {} target qubits",
                matrix.len(),
                targets.len()
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdlog_core::CircuitBuilder;
    use qdlog_gates::StandardGates;

    #[test]
    fn test_measure_then_gate_rejected() {
        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 2).unwrap();
        builder.measure(r.qubit(0).unwrap()).unwrap();
        builder.h(r.qubit(1).unwrap()).unwrap();
        builder.cx(r.qubit(1).unwrap(), r.qubit(0).unwrap()).unwrap();
        let circuit = builder.build().unwrap();

        let mut state = DenseState::new(2).unwrap();
        let err = execute(&circuit, &mut state).unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::MidCircuitMeasurement { gate_index: 2, qubit: 0 }
        ));
    }

    #[test]
    fn test_double_measurement_rejected() {
        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 1).unwrap();
        builder.measure(r.qubit(0).unwrap()).unwrap();
        builder.measure(r.qubit(0).unwrap()).unwrap();
        let circuit = builder.build().unwrap();

        let mut state = DenseState::new(1).unwrap();
        assert!(execute(&circuit, &mut state).is_err());
    }

    #[test]
    fn test_toffoli_from_controlled_cnot() {
        use qdlog_gates::{CNot, Controlled};
        use std::sync::Arc;

        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 3).unwrap();
        let lines: Vec<_> = r.qubits().collect();
        builder.x(lines[0]).unwrap().x(lines[1]).unwrap();
        builder
            .apply_gate(Arc::new(Controlled::new(Arc::new(CNot), 1)), &lines)
            .unwrap();
        let circuit = builder.build().unwrap();

        let mut state = DenseState::new(3).unwrap();
        execute(&circuit, &mut state).unwrap();
        assert_eq!(state.basis_state_of(&[0, 1, 2], 1e-9), Some(0b111));
    }

    #[test]
    fn test_cswap_moves_bits() {
        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 3).unwrap();
        let (c, a, b) = (r.qubit(0).unwrap(), r.qubit(1).unwrap(), r.qubit(2).unwrap());
        builder.x(c).unwrap().x(a).unwrap().cswap(c, a, b).unwrap();
        let circuit = builder.build().unwrap();

        let mut state = DenseState::new(3).unwrap();
        execute(&circuit, &mut state).unwrap();
        assert_eq!(state.basis_state_of(&[0, 1, 2], 1e-9), Some(0b101));
    }
}
