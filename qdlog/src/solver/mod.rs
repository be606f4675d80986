//! Discrete-log solvers on top of an execution backend

pub mod composite;
pub mod period_finding;

pub use composite::CompositeReducer;
pub use period_finding::{
    candidate_exponent, decode_outcome, PeriodFindingSolver, PhaseEstimationLayout,
};

use crate::config::SolverConfig;
use crate::error::Result;
use crate::ntheory::{ClassicalOracle, GroupOracle};
use qdlog_backend::{LocalSimulatorBackend, QuantumBackend};
use serde::{Deserialize, Serialize};

/// Result of a discrete-log query
///
/// `exponent` is `None` when no logarithm exists or none was verified within
/// the trial budget. `trials` counts measurement shots consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlogOutcome {
    pub exponent: Option<u64>,
    pub trials: usize,
}

impl DlogOutcome {
    pub fn found(exponent: u64, trials: usize) -> Self {
        Self {
            exponent: Some(exponent),
            trials,
        }
    }

    pub fn none(trials: usize) -> Self {
        Self {
            exponent: None,
            trials,
        }
    }

    pub fn is_found(&self) -> bool {
        self.exponent.is_some()
    }
}

/// Owns a backend, an order/factoring oracle and a [`SolverConfig`]
///
/// # Example
/// ```
/// use qdlog::{DiscreteLogSolver, SolverConfig};
///
/// let solver = DiscreteLogSolver::local(SolverConfig::new().with_seed(11));
/// let outcome = solver.solve(7, 19, 30).unwrap();
/// assert_eq!(outcome.exponent, Some(2));
/// ```
pub struct DiscreteLogSolver<B: QuantumBackend, O: GroupOracle = ClassicalOracle> {
    backend: B,
    oracle: O,
    config: SolverConfig,
}

impl DiscreteLogSolver<LocalSimulatorBackend, ClassicalOracle> {
    /// Ideal local sampler and trial-division oracle
    pub fn local(config: SolverConfig) -> Self {
        Self::new(config.local_backend(), ClassicalOracle, config)
    }
}

impl<B: QuantumBackend, O: GroupOracle> DiscreteLogSolver<B, O> {
    pub fn new(backend: B, oracle: O, config: SolverConfig) -> Self {
        Self {
            backend,
            oracle,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// `t` with `a^t ≡ b (mod n)`, for any order of `a`
    pub fn solve(&self, a: u64, b: u64, n: u64) -> Result<DlogOutcome> {
        self.config.validate()?;
        CompositeReducer::new(&self.backend, &self.oracle).solve(a, b, n, self.config.max_trials)
    }

    /// `t` with `a^t ≡ b (mod n)` where `order`, the order of `a`, is prime
    pub fn solve_prime_order(&self, a: u64, b: u64, n: u64, order: u64) -> Result<DlogOutcome> {
        self.config.validate()?;
        PeriodFindingSolver::new(&self.backend).solve(a, b, n, order, self.config.max_trials)
    }
}
