//! Error types for backend operations

use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// Circuit is not compatible with this backend
    #[error("Circuit incompatible with backend: {0}")]
    CircuitIncompatible(String),

    /// Backend capabilities exceeded
    #[error("Backend capability exceeded: {0}")]
    CapabilityExceeded(String),

    /// Job execution failed
    #[error("Job execution failed: {0}")]
    JobExecutionFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Backend not available
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<qdlog_core::QuantumError> for BackendError {
    fn from(err: qdlog_core::QuantumError) -> Self {
        BackendError::CircuitIncompatible(format!("Core error: {}", err))
    }
}

impl From<qdlog_sim::SimulatorError> for BackendError {
    fn from(err: qdlog_sim::SimulatorError) -> Self {
        match err {
            qdlog_sim::SimulatorError::InvalidConfig(msg) => BackendError::InvalidConfiguration(msg),
            qdlog_sim::SimulatorError::TooManyQubits { .. }
            | qdlog_sim::SimulatorError::OutOfMemory { .. } => {
                BackendError::CapabilityExceeded(err.to_string())
            }
            other => BackendError::JobExecutionFailed(other.to_string()),
        }
    }
}
