//! Core backend trait and types

use crate::{BackendCapabilities, BackendError, BackendResult, Result};
use qdlog_core::Circuit;
use std::fmt;

/// Trait for quantum execution backends
///
/// A backend accepts a finished circuit and a repetition count and returns
/// the multiset of measured bitstrings, classical bit 0 rightmost.
///
/// # Example
///
/// ```no_run
/// use qdlog_backend::{QuantumBackend, BackendResult};
/// use qdlog_core::Circuit;
///
/// fn run<B: QuantumBackend>(backend: &B, circuit: &Circuit) -> qdlog_backend::Result<BackendResult> {
///     backend.validate_circuit(circuit, 64)?;
///     backend.execute(circuit, 64)
/// }
/// ```
pub trait QuantumBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Get backend type
    fn backend_type(&self) -> BackendType;

    /// Execute a circuit synchronously
    ///
    /// # Arguments
    ///
    /// * `circuit` - The quantum circuit to execute
    /// * `shots` - Number of measurement shots
    fn execute(&self, circuit: &Circuit, shots: usize) -> Result<BackendResult>;

    /// Get backend capabilities
    fn capabilities(&self) -> &BackendCapabilities;

    /// Check if the backend is available
    fn is_available(&self) -> bool {
        true
    }

    /// Validate circuit compatibility with backend
    fn validate_circuit(&self, circuit: &Circuit, shots: usize) -> Result<()> {
        let caps = self.capabilities();

        if circuit.num_qubits() > caps.max_qubits {
            return Err(BackendError::CapabilityExceeded(format!(
                "Circuit requires {} qubits, backend supports max {}",
                circuit.num_qubits(),
                caps.max_qubits
            )));
        }

        if let Some(max_shots) = caps.max_shots {
            if shots > max_shots {
                return Err(BackendError::CapabilityExceeded(format!(
                    "{} shots requested, backend allows {}",
                    shots, max_shots
                )));
            }
        }

        if let Some(max_controls) = caps.max_controls {
            let widest = circuit.max_controls();
            if widest > max_controls {
                return Err(BackendError::CapabilityExceeded(format!(
                    "Circuit uses {} control qubits on one gate, backend supports {}",
                    widest, max_controls
                )));
            }
        }

        if let Some(op) = circuit
            .operations()
            .find(|op| !caps.supports_gate(op.gate().name()))
        {
            return Err(BackendError::CircuitIncompatible(format!(
                "Gate '{}' is not supported",
                op.gate().name()
            )));
        }

        Ok(())
    }

    /// Get backend description/status
    fn description(&self) -> String {
        format!(
            "{} ({}) - {} qubits",
            self.name(),
            self.backend_type(),
            self.capabilities().max_qubits
        )
    }
}

/// Backend type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Local simulator
    Simulator,

    /// Real quantum hardware
    Hardware,

    /// Emulator (simulates hardware noise)
    Emulator,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendType::Simulator => write!(f, "Simulator"),
            BackendType::Hardware => write!(f, "Hardware"),
            BackendType::Emulator => write!(f, "Emulator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdlog_core::CircuitBuilder;
    use qdlog_gates::StandardGates;
    use qdlog_core::ControlSet;
    use std::collections::HashMap;

    // Mock backend for testing
    struct MockBackend {
        capabilities: BackendCapabilities,
    }

    impl QuantumBackend for MockBackend {
        fn name(&self) -> &str {
            "mock"
        }

        fn backend_type(&self) -> BackendType {
            BackendType::Emulator
        }

        fn execute(&self, _circuit: &Circuit, shots: usize) -> Result<BackendResult> {
            let mut counts = HashMap::new();
            counts.insert("000".to_string(), shots);
            Ok(BackendResult::new(counts, shots))
        }

        fn capabilities(&self) -> &BackendCapabilities {
            &self.capabilities
        }
    }

    fn toffoli_phase() -> Circuit {
        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 3).unwrap();
        let controls = ControlSet::from_qubits(&[r.qubit(0).unwrap(), r.qubit(1).unwrap()]).unwrap();
        builder.mcp(0.5, &controls, r.qubit(2).unwrap()).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_backend_trait() {
        let backend = MockBackend {
            capabilities: BackendCapabilities::simulator(),
        };

        assert_eq!(backend.name(), "mock");
        assert!(backend.is_available());
        assert_eq!(backend.description(), "mock (Emulator) - 30 qubits");
        assert_eq!(backend.execute(&toffoli_phase(), 5).unwrap().shots, 5);
    }

    #[test]
    fn test_validate_limits() {
        let backend = MockBackend {
            capabilities: BackendCapabilities {
                max_qubits: 2,
                max_shots: Some(10),
                max_controls: Some(1),
                ..Default::default()
            },
        };
        let circuit = toffoli_phase();
        assert!(matches!(
            backend.validate_circuit(&circuit, 1),
            Err(BackendError::CapabilityExceeded(_))
        ));

        let backend = MockBackend {
            capabilities: BackendCapabilities {
                max_shots: Some(10),
                max_controls: Some(1),
                ..Default::default()
            },
        };
        assert!(backend.validate_circuit(&circuit, 11).is_err());
        // two controls on the phase
        assert!(backend.validate_circuit(&circuit, 5).is_err());
    }

    #[test]
    fn test_validate_gate_support() {
        let mut gates = crate::GateSet::new();
        gates.insert("H");
        let backend = MockBackend {
            capabilities: BackendCapabilities {
                supported_gates: gates,
                ..Default::default()
            },
        };
        assert!(matches!(
            backend.validate_circuit(&toffoli_phase(), 1),
            Err(BackendError::CircuitIncompatible(_))
        ));
    }

    #[test]
    fn test_backend_types() {
        assert_eq!(format!("{}", BackendType::Simulator), "Simulator");
        assert_eq!(format!("{}", BackendType::Hardware), "Hardware");
    }
}
