//! Discrete logarithms modulo N by simulated quantum period finding
//!
//! Given `a`, `b` and `N` with `a` invertible modulo `N`, find `t` such that
//! `a^t ≡ b (mod N)`. The order of `a` is split into primes; each prime-order
//! piece is solved by a two-register phase-estimation circuit whose modular
//! exponentiation is synthesized gate by gate:
//!
//! - [`arith`]: Fourier adder, modular adder, controlled modular multiplier
//!   and modular exponentiator
//! - [`solver`]: [`PeriodFindingSolver`] for prime orders and
//!   [`CompositeReducer`] for the general case
//! - [`ntheory`]: the classical helpers, with order finding and factoring
//!   behind [`GroupOracle`]
//!
//! Circuits run on any [`QuantumBackend`]; the free functions below use the
//! ideal local simulator.
//!
//! # Example
//! ```
//! use qdlog::discrete_log;
//!
//! // 7^2 = 49 ≡ 19 (mod 30)
//! let outcome = discrete_log(7, 19, 30, 64).unwrap();
//! assert_eq!(outcome.exponent, Some(2));
//! assert!(outcome.trials <= 2 * 64);
//! ```

pub mod arith;
pub mod config;
pub mod error;
pub mod ntheory;
pub mod solver;

pub use config::{SolverConfig, DEFAULT_MAX_TRIALS};
pub use error::{DiscreteLogError, Result};
pub use ntheory::{ClassicalOracle, GroupOracle};
pub use solver::{CompositeReducer, DiscreteLogSolver, DlogOutcome, PeriodFindingSolver};

pub use qdlog_backend::{LocalSimulatorBackend, QuantumBackend};

/// `t` with `a^t ≡ b (mod n)`, using at most `max_trials` shots per prime
/// factor of the order of `a`
///
/// The reported `trials` is summed over those factors, so it can exceed
/// `max_trials` when the order is composite. Runs on the local simulator
/// seeded from system entropy.
pub fn discrete_log(a: u64, b: u64, n: u64, max_trials: usize) -> Result<DlogOutcome> {
    DiscreteLogSolver::local(SolverConfig::new().with_max_trials(max_trials)).solve(a, b, n)
}

/// `t` with `a^t ≡ b (mod n)` when `order`, the order of `a`, is prime
pub fn discrete_log_solver(
    a: u64,
    b: u64,
    n: u64,
    order: u64,
    max_trials: usize,
) -> Result<DlogOutcome> {
    DiscreteLogSolver::local(SolverConfig::new().with_max_trials(max_trials))
        .solve_prime_order(a, b, n, order)
}
