//! Gate-level helpers on top of [`CircuitBuilder`]

use crate::standard::{CNot, Controlled, Fredkin, Hadamard, Measure, PauliX, Phase, Swap};
use qdlog_core::{BlockKind, CircuitBuilder, ControlSet, Gate, QubitId, QubitRegister, Result};
use std::f64::consts::PI;
use std::sync::Arc;

/// Extension trait adding the standard gates to [`CircuitBuilder`]
///
/// Registers are little-endian: line `k` of a register holds bit `k`.
pub trait StandardGates {
    fn h(&mut self, qubit: QubitId) -> Result<&mut Self>;

    fn x(&mut self, qubit: QubitId) -> Result<&mut Self>;

    fn p(&mut self, theta: f64, qubit: QubitId) -> Result<&mut Self>;

    /// Phase on `target` conditioned on every line of `controls`
    ///
    /// Falls back to a plain [`Phase`] when `controls` is empty.
    fn mcp(&mut self, theta: f64, controls: &ControlSet, target: QubitId) -> Result<&mut Self>;

    fn cx(&mut self, control: QubitId, target: QubitId) -> Result<&mut Self>;

    fn swap(&mut self, a: QubitId, b: QubitId) -> Result<&mut Self>;

    fn cswap(&mut self, control: QubitId, a: QubitId, b: QubitId) -> Result<&mut Self>;

    fn measure(&mut self, qubit: QubitId) -> Result<&mut Self>;

    /// Hadamard on every line of `register`
    fn h_register(&mut self, register: QubitRegister) -> Result<&mut Self>;

    /// Measure every line of `register`, least significant first
    fn measure_register(&mut self, register: QubitRegister) -> Result<&mut Self>;

    /// Quantum Fourier transform over `register`
    ///
    /// Without swaps, line `k` ends up carrying the phase `2π·x / 2^(k+1)`
    /// of the register value `x`, which is the form the Fourier adders
    /// expect. With swaps the lines are reversed afterwards.
    fn qft(&mut self, register: QubitRegister, swaps: bool) -> Result<&mut Self>;

    /// Exact inverse of [`qft`](StandardGates::qft) with the same `swaps`
    fn iqft(&mut self, register: QubitRegister, swaps: bool) -> Result<&mut Self>;
}

fn apply_controlled<'a>(
    builder: &'a mut CircuitBuilder,
    base: Arc<dyn Gate>,
    controls: &ControlSet,
    targets: &[QubitId],
) -> Result<&'a mut CircuitBuilder> {
    if controls.is_empty() {
        return builder.apply_gate(base, targets);
    }
    let mut lines: Vec<QubitId> = controls.iter().collect();
    lines.extend_from_slice(targets);
    builder.apply_gate(Arc::new(Controlled::new(base, controls.len())), &lines)
}

/// Reverse the line order of `register`; `mirrored` emits the swaps last pair first
fn reverse_lines(
    builder: &mut CircuitBuilder,
    register: QubitRegister,
    mirrored: bool,
) -> Result<()> {
    let w = register.len();
    let mut pairs: Vec<usize> = (0..w / 2).collect();
    if mirrored {
        pairs.reverse();
    }
    for j in pairs {
        builder.swap(register.qubit(j)?, register.qubit(w - 1 - j)?)?;
    }
    Ok(())
}

impl StandardGates for CircuitBuilder {
    fn h(&mut self, qubit: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(Hadamard), &[qubit])
    }

    fn x(&mut self, qubit: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(PauliX), &[qubit])
    }

    fn p(&mut self, theta: f64, qubit: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(Phase::new(theta)), &[qubit])
    }

    fn mcp(&mut self, theta: f64, controls: &ControlSet, target: QubitId) -> Result<&mut Self> {
        apply_controlled(self, Arc::new(Phase::new(theta)), controls, &[target])
    }

    fn cx(&mut self, control: QubitId, target: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(CNot), &[control, target])
    }

    fn swap(&mut self, a: QubitId, b: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(Swap), &[a, b])
    }

    fn cswap(&mut self, control: QubitId, a: QubitId, b: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(Fredkin), &[control, a, b])
    }

    fn measure(&mut self, qubit: QubitId) -> Result<&mut Self> {
        self.apply_gate(Arc::new(Measure), &[qubit])
    }

    fn h_register(&mut self, register: QubitRegister) -> Result<&mut Self> {
        for q in register.qubits() {
            self.h(q)?;
        }
        Ok(self)
    }

    fn measure_register(&mut self, register: QubitRegister) -> Result<&mut Self> {
        for q in register.qubits() {
            self.measure(q)?;
        }
        Ok(self)
    }

    fn qft(&mut self, register: QubitRegister, swaps: bool) -> Result<&mut Self> {
        self.begin_block(BlockKind::Qft, register)?;
        for j in (0..register.len()).rev() {
            let target = register.qubit(j)?;
            self.h(target)?;
            for k in (0..j).rev() {
                let angle = PI / (1u64 << (j - k)) as f64;
                self.mcp(angle, &ControlSet::single(register.qubit(k)?), target)?;
            }
        }
        if swaps {
            reverse_lines(self, register, false)?;
        }
        self.end_block(BlockKind::Qft)?;
        Ok(self)
    }

    fn iqft(&mut self, register: QubitRegister, swaps: bool) -> Result<&mut Self> {
        self.begin_block(BlockKind::InverseQft, register)?;
        if swaps {
            reverse_lines(self, register, true)?;
        }
        for j in 0..register.len() {
            let target = register.qubit(j)?;
            for k in 0..j {
                let angle = -PI / (1u64 << (j - k)) as f64;
                self.mcp(angle, &ControlSet::single(register.qubit(k)?), target)?;
            }
            self.h(target)?;
        }
        self.end_block(BlockKind::InverseQft)?;
        Ok(self)
    }
}
