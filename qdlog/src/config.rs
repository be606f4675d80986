//! Solver configuration

use crate::error::{DiscreteLogError, Result};
use qdlog_backend::{LocalSimulatorBackend, LocalSimulatorConfig};

/// Default number of measurement shots per prime-order subproblem
pub const DEFAULT_MAX_TRIALS: usize = 64;

/// Configuration for [`DiscreteLogSolver`](crate::DiscreteLogSolver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Shots submitted to the backend per subproblem, each one a trial
    ///
    /// Default: 64
    pub max_trials: usize,

    /// Seed for the local simulator backend
    ///
    /// Only used when the solver builds its own backend. If None, sampling
    /// is seeded from system entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_trials: DEFAULT_MAX_TRIALS,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Set the random seed for reproducible sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_trials == 0 {
            return Err(DiscreteLogError::NoTrials);
        }
        Ok(())
    }

    /// Ideal local sampler honoring `seed`
    pub fn local_backend(&self) -> LocalSimulatorBackend {
        let config = LocalSimulatorConfig::new();
        let config = match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        };
        LocalSimulatorBackend::with_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_trials, 64);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::new().with_max_trials(8).with_seed(3);
        assert_eq!(config.max_trials, 8);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.local_backend().config().seed, Some(3));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = SolverConfig::new().with_max_trials(0);
        assert!(matches!(config.validate(), Err(DiscreteLogError::NoTrials)));
    }
}
