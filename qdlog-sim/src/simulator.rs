//! Core simulator implementation

use qdlog_core::Circuit;
use qdlog_state::DenseState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::debug;

use crate::{
    config::{SimulatorConfig, AMPLITUDE_BYTES},
    error::{Result, SimulatorError},
    executor,
    result::{MeasurementCounts, SimulationResult},
    statistics::ExecutionStatistics,
};

/// Dense state-vector simulator
///
/// # Example
///
/// ```
/// use qdlog_core::CircuitBuilder;
/// use qdlog_gates::StandardGates;
/// use qdlog_sim::Simulator;
///
/// let mut builder = CircuitBuilder::new();
/// let reg = builder.allocate_register("r", 1).unwrap();
/// builder.h(reg.qubit(0).unwrap()).unwrap();
/// let circuit = builder.build().unwrap();
///
/// let result = Simulator::default().run(&circuit).unwrap();
/// assert!(result.state.is_normalized(1e-10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run a quantum circuit simulation
    ///
    /// Initializes |0…0⟩, applies every unitary operation and records the
    /// terminal measurements.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The circuit has no operations
    /// - The state vector would exceed the memory limit
    /// - An operation follows a measurement on the same line
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let total_start = Instant::now();

        if circuit.is_empty() {
            return Err(SimulatorError::InvalidCircuit("Empty circuit".to_string()));
        }

        let num_qubits = circuit.num_qubits();
        let max_qubits = self.config.max_qubits();
        if num_qubits > max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits,
            });
        }

        let init_start = Instant::now();
        let mut state =
            DenseState::new(num_qubits)?.with_parallel_threshold(self.config.parallel_threshold);
        let init_time = init_start.elapsed();

        let gate_start = Instant::now();
        let measured = executor::execute(circuit, &mut state)?;
        let gate_time = gate_start.elapsed();

        debug!(
            num_qubits,
            operations = circuit.len(),
            measured = measured.len(),
            elapsed_ms = gate_time.as_secs_f64() * 1e3,
            "circuit simulated"
        );

        let mut result = SimulationResult::new(state, measured);
        if self.config.collect_statistics {
            let stats = ExecutionStatistics {
                total_time: total_start.elapsed(),
                initialization_time: init_time,
                gate_application_time: gate_time,
                gates_executed: circuit.len() - result.measured.len(),
                measured_qubits: result.measured.len(),
                peak_memory_bytes: (1usize << num_qubits) * AMPLITUDE_BYTES,
            };
            result = result.with_statistics(stats);
        }

        Ok(result)
    }

    /// Run `circuit` and sample its measurements `shots` times
    ///
    /// Sampling is reproducible when the configuration carries a seed.
    pub fn sample(&self, circuit: &Circuit, shots: usize) -> Result<MeasurementCounts> {
        let result = self.run(circuit)?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        result.sample(shots, &mut rng)
    }
}
