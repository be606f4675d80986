//! Circuit builder with a named register arena

use crate::{Circuit, Gate, GateOp, QuantumError, QubitId, QubitRegister, Result};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A named register reserved in the line arena
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterInfo {
    pub name: String,
    pub register: QubitRegister,
}

/// Kind of a recorded sub-block invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Qft,
    InverseQft,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Qft => write!(f, "QFT"),
            BlockKind::InverseQft => write!(f, "IQFT"),
        }
    }
}

/// A span of the gate log produced by one sub-block invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubBlock {
    pub kind: BlockKind,
    pub register: QubitRegister,
    /// Indices into the operation log
    pub ops: Range<usize>,
}

/// A circuit builder that owns the line arena
///
/// Registers are reserved up front with [`allocate_register`]; once the first
/// gate is appended the arena is sealed and its size is fixed. Every
/// component that synthesizes gates receives `&mut CircuitBuilder` plus the
/// register views it is allowed to touch.
///
/// [`allocate_register`]: CircuitBuilder::allocate_register
///
/// # Example
/// ```
/// use qdlog_core::{CircuitBuilder, Gate, QubitId};
/// use std::sync::Arc;
///
/// # #[derive(Debug)]
/// # struct MockGate;
/// # impl Gate for MockGate {
/// #     fn name(&self) -> &str { "H" }
/// #     fn num_qubits(&self) -> usize { 1 }
/// # }
/// let mut builder = CircuitBuilder::new();
/// let reg = builder.allocate_register("x", 2).unwrap();
/// builder.apply_gate(Arc::new(MockGate), &[reg.qubit(1).unwrap()]).unwrap();
///
/// let circuit = builder.build().unwrap();
/// assert_eq!(circuit.num_qubits(), 2);
/// assert_eq!(circuit.len(), 1);
/// ```
#[derive(Default)]
pub struct CircuitBuilder {
    registers: Vec<RegisterInfo>,
    num_qubits: usize,
    operations: Vec<GateOp>,
    blocks: Vec<SubBlock>,
    open_blocks: Vec<(BlockKind, QubitRegister, usize)>,
}

impl CircuitBuilder {
    /// Create an empty builder with no lines
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `len` fresh lines under `name`
    ///
    /// # Errors
    /// - [`QuantumError::ArenaSealed`] once any gate has been appended
    /// - [`QuantumError::DuplicateRegister`] if the name is taken
    /// - [`QuantumError::ValidationError`] for a zero-length register
    pub fn allocate_register(&mut self, name: &str, len: usize) -> Result<QubitRegister> {
        if !self.operations.is_empty() {
            return Err(QuantumError::ArenaSealed(name.to_string()));
        }
        if self.registers.iter().any(|r| r.name == name) {
            return Err(QuantumError::DuplicateRegister(name.to_string()));
        }
        if len == 0 {
            return Err(QuantumError::ValidationError(format!(
                "Register '{}' must have at least one line",
                name
            )));
        }

        let register = QubitRegister::new(self.num_qubits, len);
        self.num_qubits += len;
        self.registers.push(RegisterInfo {
            name: name.to_string(),
            register,
        });
        Ok(register)
    }

    /// Look up a register by name
    pub fn register(&self, name: &str) -> Result<QubitRegister> {
        self.registers
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.register)
            .ok_or_else(|| QuantumError::UnknownRegister(name.to_string()))
    }

    /// All registers in allocation order
    #[inline]
    pub fn registers(&self) -> &[RegisterInfo] {
        &self.registers
    }

    /// Total lines in the arena
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations appended so far
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append a gate to the log
    ///
    /// # Errors
    /// Returns error if a line lies outside the arena, the arity is wrong or
    /// a line repeats.
    pub fn apply_gate(&mut self, gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<&mut Self> {
        for &qubit in qubits {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        self.operations.push(GateOp::new(gate, qubits)?);
        Ok(self)
    }

    /// Open a sub-block over `register`
    pub fn begin_block(&mut self, kind: BlockKind, register: QubitRegister) -> Result<()> {
        if register.end() > self.num_qubits {
            return Err(QuantumError::invalid_qubit(register.end() - 1, self.num_qubits));
        }
        self.open_blocks
            .push((kind, register, self.operations.len()));
        Ok(())
    }

    /// Close the innermost open sub-block
    ///
    /// # Errors
    /// Returns [`QuantumError::UnbalancedBlock`] if no block is open or the
    /// innermost open block has a different kind.
    pub fn end_block(&mut self, kind: BlockKind) -> Result<()> {
        match self.open_blocks.pop() {
            Some((open, register, start)) if open == kind => {
                self.blocks.push(SubBlock {
                    kind,
                    register,
                    ops: start..self.operations.len(),
                });
                Ok(())
            }
            Some((open, _, _)) => Err(QuantumError::UnbalancedBlock(format!(
                "closing {} while {} is open",
                kind, open
            ))),
            None => Err(QuantumError::UnbalancedBlock(format!(
                "closing {} with no open block",
                kind
            ))),
        }
    }

    /// Completed sub-blocks in completion order
    #[inline]
    pub fn blocks(&self) -> &[SubBlock] {
        &self.blocks
    }

    /// Validate the log accumulated so far
    pub fn validate(&self) -> Result<()> {
        if let Some((kind, _, _)) = self.open_blocks.last() {
            return Err(QuantumError::UnbalancedBlock(format!("{} never closed", kind)));
        }
        Ok(())
    }

    /// Hand the finished circuit over, consuming the builder
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyCircuit`] if no register was allocated and
    /// [`QuantumError::UnbalancedBlock`] if a sub-block is still open.
    pub fn build(self) -> Result<Circuit> {
        self.validate()?;
        Circuit::from_operations(self.num_qubits, self.operations)
    }
}

impl fmt::Debug for CircuitBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBuilder")
            .field("registers", &self.registers)
            .field("num_qubits", &self.num_qubits)
            .field("num_operations", &self.operations.len())
            .field("blocks", &self.blocks.len())
            .finish()
    }
}
