//! The append-only gate log

use crate::gate::Gate;
use crate::{GateOp, QuantumError, QubitId, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A quantum circuit
///
/// A fixed number of lines plus the ordered log of operations applied to
/// them. This is the only artifact handed to an execution backend.
///
/// # Example
/// ```
/// use qdlog_core::Circuit;
///
/// let circuit = Circuit::new(3);
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.len(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Assemble a circuit from an already-recorded operation log
    ///
    /// # Errors
    /// Returns error if the circuit has no lines or an operation uses a
    /// line outside the arena.
    pub fn from_operations(num_qubits: usize, operations: Vec<GateOp>) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        let circuit = Self {
            num_qubits,
            operations,
        };
        circuit.validate()?;
        Ok(circuit)
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit is empty (no operations)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Add a gate operation to the circuit
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds
    pub fn add_gate(&mut self, gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<()> {
        for &qubit in qubits {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }

        let gate_op = GateOp::new(gate, qubits)?;
        self.operations.push(gate_op);
        Ok(())
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &GateOp> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&GateOp> {
        self.operations.get(index)
    }

    /// Histogram of operations by gate name
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.gate().name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Lines read out by measurement operations, in measurement order
    ///
    /// Position `i` of the returned vector is classical bit `i`.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        self.operations
            .iter()
            .filter(|op| !op.gate().is_unitary())
            .flat_map(|op| op.qubits().iter().copied())
            .collect()
    }

    /// Widest control fan-in of any operation
    pub fn max_controls(&self) -> usize {
        self.operations
            .iter()
            .map(|op| op.gate().num_controls())
            .max()
            .unwrap_or(0)
    }

    /// Validate the circuit
    ///
    /// Checks that all operations address lines inside the arena.
    pub fn validate(&self) -> Result<()> {
        for (i, op) in self.operations.iter().enumerate() {
            for &qubit in op.qubits() {
                if qubit.index() >= self.num_qubits {
                    return Err(QuantumError::ValidationError(format!(
                        "Operation {} uses invalid qubit {}",
                        i, qubit
                    )));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Circuit({} qubits, {} operations)", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}
