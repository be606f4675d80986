//! Error types for the simulator

use qdlog_core::QuantumError;
use qdlog_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Clone, Error)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    #[error("Out of memory: requested {requested} bytes, limit {limit} bytes")]
    OutOfMemory { requested: usize, limit: usize },

    #[error("Too many qubits: {num_qubits} requested, maximum is {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    #[error("Gate application failed at operation {gate_index}: {reason}")]
    GateApplicationFailed { gate_index: usize, reason: String },

    /// Gate applied to a line that was already measured
    #[error("Operation {gate_index} acts on measured qubit {qubit}")]
    MidCircuitMeasurement { gate_index: usize, qubit: usize },

    #[error("Measurement failed: {0}")]
    MeasurementFailed(String),

    #[error("Circuit error: {0}")]
    Circuit(#[from] QuantumError),

    #[error("State error: {0}")]
    State(#[from] StateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulatorError::TooManyQubits {
            num_qubits: 40,
            max_qubits: 30,
        };
        assert_eq!(err.to_string(), "Too many qubits: 40 requested, maximum is 30");

        let err = SimulatorError::MidCircuitMeasurement {
            gate_index: 7,
            qubit: 2,
        };
        assert!(err.to_string().contains("measured qubit 2"));
    }

    #[test]
    fn test_from_state_error() {
        let err: SimulatorError = StateError::InvalidDimension { dimension: 3 }.into();
        assert!(matches!(err, SimulatorError::State(_)));
    }
}
