//! Error types for circuit construction

use crate::QubitId;
use thiserror::Error;

/// Errors that can occur while building or validating a circuit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantumError {
    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Duplicate qubit in gate operation or control set
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Register view indexed or sliced past its end
    #[error("Index {index} out of range for register of length {len}")]
    RegisterOutOfRange { index: usize, len: usize },

    /// Register name already allocated
    #[error("Register '{0}' is already allocated")]
    DuplicateRegister(String),

    /// No register with the given name
    #[error("Unknown register '{0}'")]
    UnknownRegister(String),

    /// Line arena is sealed once the first gate has been appended
    #[error("Cannot allocate register '{0}' after gates have been appended")]
    ArenaSealed(String),

    /// Sub-block markers were not properly nested
    #[error("Unbalanced sub-block: {0}")]
    UnbalancedBlock(String),

    /// Generic circuit validation error
    #[error("Circuit validation failed: {0}")]
    ValidationError(String),
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create a register range error
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::RegisterOutOfRange { index, len }
    }
}
