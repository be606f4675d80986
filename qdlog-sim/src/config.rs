//! Simulator configuration

use qdlog_state::dense_state::DEFAULT_PARALLEL_THRESHOLD;

/// Size of one `Complex64` amplitude
pub const AMPLITUDE_BYTES: usize = 16;

/// Configuration for the quantum simulator
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Minimum number of qubits to enable parallel gate kernels
    ///
    /// Default: 14
    pub parallel_threshold: usize,

    /// Enable execution statistics collection
    ///
    /// Default: false
    pub collect_statistics: bool,

    /// Random number generator seed for sampling
    ///
    /// If None, sampling is seeded from system entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Memory limit in bytes for the state vector, 0 for no limit
    ///
    /// Default: 0
    pub memory_limit: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            collect_statistics: false,
            seed: None,
            memory_limit: 0,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic configuration with statistics enabled
    pub fn debug() -> Self {
        Self {
            collect_statistics: true,
            seed: Some(42),
            ..Default::default()
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the random seed for deterministic sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable statistics collection
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.collect_statistics = enabled;
        self
    }

    /// Set memory limit in bytes
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.memory_limit != 0 && self.memory_limit < 2 * AMPLITUDE_BYTES {
            return Err(format!(
                "memory_limit of {} bytes cannot hold a single-qubit state",
                self.memory_limit
            ));
        }
        Ok(())
    }

    /// Largest qubit count the memory limit allows
    pub fn max_qubits(&self) -> usize {
        const PRACTICAL_MAX: usize = 34;
        if self.memory_limit == 0 {
            return PRACTICAL_MAX;
        }
        let amplitudes = self.memory_limit / AMPLITUDE_BYTES;
        amplitudes.checked_ilog2().unwrap_or(0) as usize
    }
}
