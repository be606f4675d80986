//! Error types for discrete-log circuit synthesis and solving
//!
//! Only contract violations are errors. "No logarithm exists" and an
//! exhausted trial budget are ordinary outcomes, see
//! [`DlogOutcome`](crate::DlogOutcome).

use qdlog_backend::BackendError;
use qdlog_core::QuantumError;
use thiserror::Error;

/// Result type for qdlog operations
pub type Result<T> = std::result::Result<T, DiscreteLogError>;

/// Errors raised by the arithmetic circuits and the solvers
#[derive(Error, Debug)]
pub enum DiscreteLogError {
    /// Modulus outside the range a register of the given width can hold
    #[error("Modulus {modulus} out of range for {width}-bit registers")]
    ModulusOutOfRange { modulus: u64, width: usize },

    /// Modulus too small to define a multiplicative group
    #[error("Modulus must be at least 2, got {0}")]
    ModulusTooSmall(u64),

    /// Register length does not match the width the component expects
    #[error("Register '{role}' has {actual} lines, expected {expected}")]
    RegisterWidth {
        role: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two registers handed to one component share lines
    #[error("Registers '{0}' and '{1}' overlap")]
    RegisterOverlap(&'static str, &'static str),

    /// Component requires at least one control line
    #[error("Modular addition requires at least one control line")]
    MissingControls,

    /// Auxiliary line is also used as a data or control line
    #[error("Auxiliary line {0} aliases a data or control line")]
    AuxiliaryAliased(qdlog_core::QubitId),

    /// Constant has no inverse modulo the modulus
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: u64, modulus: u64 },

    /// Declared order does not annihilate the base
    #[error("{base}^{order} mod {modulus} != 1")]
    OrderMismatch { base: u64, order: u64, modulus: u64 },

    /// Order handed to the period-finding solver is below 2
    #[error("Subgroup order must be at least 2, got {0}")]
    InvalidOrder(u64),

    /// Trial budget of zero
    #[error("max_trials must be at least 1")]
    NoTrials,

    /// Oracle could not produce the order of an invertible element
    #[error("Order oracle failed for {base} modulo {modulus}")]
    OracleFailed { base: u64, modulus: u64 },

    /// Measurement outcome that does not parse as the expected bitstring
    #[error("Malformed measurement outcome '{0}'")]
    MalformedOutcome(String),

    /// Circuit construction error
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    /// Execution backend error
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DiscreteLogError {
    /// Create a register width error
    pub fn register_width(role: &'static str, expected: usize, actual: usize) -> Self {
        Self::RegisterWidth {
            role,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiscreteLogError::ModulusOutOfRange {
            modulus: 16,
            width: 4,
        };
        assert_eq!(err.to_string(), "Modulus 16 out of range for 4-bit registers");

        let err = DiscreteLogError::register_width("aux", 6, 5);
        assert!(err.to_string().contains("aux"));
        assert!(err.to_string().contains("6"));
    }

    #[test]
    fn test_from_circuit_error() {
        let err: DiscreteLogError = QuantumError::EmptyCircuit.into();
        assert!(matches!(err, DiscreteLogError::Circuit(_)));
    }
}
