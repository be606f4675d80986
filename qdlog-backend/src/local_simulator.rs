//! Local Simulator Backend
//!
//! Wraps the `qdlog-sim` state-vector simulator behind the unified backend
//! API. Sampling is ideal: outcomes follow the exact marginal distribution
//! of the measured lines, with no noise model.
//!
//! # Example
//!
//! ```
//! use qdlog_backend::{LocalSimulatorBackend, LocalSimulatorConfig, QuantumBackend};
//! use qdlog_core::CircuitBuilder;
//! use qdlog_gates::StandardGates;
//!
//! let mut builder = CircuitBuilder::new();
//! let reg = builder.allocate_register("r", 2).unwrap();
//! builder.x(reg.qubit(1).unwrap()).unwrap();
//! builder.measure_register(reg).unwrap();
//! let circuit = builder.build().unwrap();
//!
//! let backend = LocalSimulatorBackend::with_config(LocalSimulatorConfig::default().with_seed(7));
//! let result = backend.execute(&circuit, 16).unwrap();
//! assert_eq!(result.get_count("10"), 16);
//! ```

use crate::{
    BackendCapabilities, BackendError, BackendResult, BackendType, ExecutionMetadata,
    QuantumBackend, Result,
};
use qdlog_core::Circuit;
use qdlog_sim::{Simulator, SimulatorConfig};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Configuration for the local simulator backend
#[derive(Debug, Clone)]
pub struct LocalSimulatorConfig {
    /// Use deterministic seed for reproducibility
    pub seed: Option<u64>,

    /// Maximum number of qubits (default: 30 for practical memory limits)
    pub max_qubits: usize,

    /// Qubit count at which gate kernels go parallel
    pub parallel_threshold: usize,
}

impl Default for LocalSimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 30, // ~16GB for dense state
            parallel_threshold: SimulatorConfig::default().parallel_threshold,
        }
    }
}

impl LocalSimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 {
            return Err(BackendError::InvalidConfiguration(
                "max_qubits must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    fn simulator_config(&self) -> SimulatorConfig {
        let config = SimulatorConfig::new().with_parallel_threshold(self.parallel_threshold);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Local simulator backend using qdlog-sim
pub struct LocalSimulatorBackend {
    name: String,
    config: LocalSimulatorConfig,
    capabilities: BackendCapabilities,
}

impl LocalSimulatorBackend {
    /// Create a new local simulator backend with default configuration
    pub fn new() -> Self {
        Self::with_config(LocalSimulatorConfig::default())
    }

    /// Create a new local simulator backend with custom configuration
    pub fn with_config(config: LocalSimulatorConfig) -> Self {
        let capabilities = BackendCapabilities {
            max_qubits: config.max_qubits,
            metadata: HashMap::from([
                ("type".to_string(), "local_simulator".to_string()),
                (
                    "parallel_threshold".to_string(),
                    config.parallel_threshold.to_string(),
                ),
            ]),
            ..BackendCapabilities::simulator()
        };

        Self {
            name: "LocalSimulator".to_string(),
            config,
            capabilities,
        }
    }

    /// Set the backend name
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub fn config(&self) -> &LocalSimulatorConfig {
        &self.config
    }
}

impl Default for LocalSimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumBackend for LocalSimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    fn execute(&self, circuit: &Circuit, shots: usize) -> Result<BackendResult> {
        let start_time = Instant::now();

        self.config.validate()?;
        self.validate_circuit(circuit, shots)?;

        let simulator = Simulator::new(self.config.simulator_config())?;
        let counts = simulator.sample(circuit, shots)?;

        let execution_time = start_time.elapsed();
        debug!(
            backend = %self.name,
            num_qubits = circuit.num_qubits(),
            gates = circuit.len(),
            shots,
            outcomes = counts.num_outcomes(),
            elapsed_ms = execution_time.as_secs_f64() * 1e3,
            "circuit executed"
        );

        let metadata = ExecutionMetadata {
            num_qubits: Some(circuit.num_qubits()),
            gate_count: Some(circuit.len()),
            ..ExecutionMetadata::new(self.name.clone(), execution_time)
        };

        Ok(BackendResult {
            counts: counts.into_counts(),
            shots,
            metadata,
        })
    }

    fn capabilities(&self) -> &BackendCapabilities {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdlog_core::CircuitBuilder;
    use qdlog_gates::StandardGates;

    fn plus_zero_one() -> Circuit {
        // q0 = |+>, q1 = |0>, q2 = |1>
        let mut builder = CircuitBuilder::new();
        let r = builder.allocate_register("r", 3).unwrap();
        builder.h(r.qubit(0).unwrap()).unwrap();
        builder.x(r.qubit(2).unwrap()).unwrap();
        builder.measure_register(r).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_backend_creation() {
        let backend = LocalSimulatorBackend::new();
        assert_eq!(backend.name(), "LocalSimulator");
        assert_eq!(backend.backend_type(), BackendType::Simulator);
        assert!(backend.is_available());
    }

    #[test]
    fn test_backend_with_custom_name() {
        let backend = LocalSimulatorBackend::new().with_name("MySimulator".to_string());
        assert_eq!(backend.name(), "MySimulator");
    }

    #[test]
    fn test_execute_counts() {
        let backend =
            LocalSimulatorBackend::with_config(LocalSimulatorConfig::default().with_seed(5));
        let result = backend.execute(&plus_zero_one(), 500).unwrap();

        assert_eq!(result.shots, 500);
        assert_eq!(result.get_count("100") + result.get_count("101"), 500);
        assert!(result.get_count("100") > 150);
        assert!(result.get_count("101") > 150);
        assert_eq!(result.metadata.num_qubits, Some(3));
        assert_eq!(result.metadata.gate_count, Some(5));
        assert_eq!(result.metadata.backend_name.as_deref(), Some("LocalSimulator"));
        assert!(result.metadata.execution_time.is_some());
    }

    #[test]
    fn test_seed_reproducible() {
        let config = LocalSimulatorConfig::default().with_seed(99);
        let a = LocalSimulatorBackend::with_config(config.clone())
            .execute(&plus_zero_one(), 100)
            .unwrap();
        let b = LocalSimulatorBackend::with_config(config)
            .execute(&plus_zero_one(), 100)
            .unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_circuit_too_large() {
        let backend =
            LocalSimulatorBackend::with_config(LocalSimulatorConfig::default().with_max_qubits(2));
        assert!(matches!(
            backend.execute(&plus_zero_one(), 10),
            Err(BackendError::CapabilityExceeded(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        let backend =
            LocalSimulatorBackend::with_config(LocalSimulatorConfig::default().with_max_qubits(0));
        assert!(matches!(
            backend.execute(&plus_zero_one(), 10),
            Err(BackendError::InvalidConfiguration(_))
        ));
    }
}
