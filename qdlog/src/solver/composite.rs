//! Reduction of a composite-order discrete logarithm to prime-order ones
//!
//! With `r = p_1 · … · p_n` (ascending, with multiplicity) and
//! `R_i = p_i · … · p_n`, the exponent is written in mixed radix as
//! `k = c_1·R_2 + c_2·R_3 + … + c_n`. Digit `c_i` is the logarithm of
//! `(b · a^-k)^(r / R_i)` to the base `a^(r / p_i)`, which has order `p_i`,
//! where `k` holds the digits already found. Digits are peeled off from
//! `c_n` upwards, so the subproblems are strictly sequential.

use super::period_finding::PeriodFindingSolver;
use super::DlogOutcome;
use crate::error::{DiscreteLogError, Result};
use crate::ntheory::{gcd, mod_mul, mod_pow, GroupOracle};
use qdlog_backend::QuantumBackend;
use tracing::{debug, info, instrument, warn};

/// Solves `a^t ≡ b (mod N)` for any invertible `a`
pub struct CompositeReducer<'a, B: QuantumBackend + ?Sized, O: GroupOracle + ?Sized> {
    solver: PeriodFindingSolver<'a, B>,
    oracle: &'a O,
}

/// `suffix[i] = factors[i] · … · factors[len-1]`, with `suffix[len] = 1`
fn suffix_products(factors: &[u64]) -> Option<Vec<u64>> {
    let mut suffix = vec![1u64; factors.len() + 1];
    for i in (0..factors.len()).rev() {
        suffix[i] = suffix[i + 1].checked_mul(factors[i])?;
    }
    Some(suffix)
}

impl<'a, B: QuantumBackend + ?Sized, O: GroupOracle + ?Sized> CompositeReducer<'a, B, O> {
    pub fn new(backend: &'a B, oracle: &'a O) -> Self {
        Self {
            solver: PeriodFindingSolver::new(backend),
            oracle,
        }
    }

    /// Find `t` with `a^t ≡ b (mod modulus)`
    ///
    /// Returns the smallest such `t` (it lies below the order of `a`) and the
    /// total number of trials spent across subproblems. A subproblem that
    /// finds nothing ends the whole reduction with no exponent.
    #[instrument(level = "debug", skip(self))]
    pub fn solve(&self, a: u64, b: u64, modulus: u64, max_trials: usize) -> Result<DlogOutcome> {
        if modulus < 2 {
            return Err(DiscreteLogError::ModulusTooSmall(modulus));
        }
        if max_trials == 0 {
            return Err(DiscreteLogError::NoTrials);
        }
        if gcd(a, modulus) != 1 {
            return Err(DiscreteLogError::NotInvertible { value: a, modulus });
        }
        if gcd(b, modulus) != 1 {
            debug!("b is not invertible, no logarithm");
            return Ok(DlogOutcome::none(0));
        }

        let oracle_failed = || DiscreteLogError::OracleFailed { base: a, modulus };
        let order = self.oracle.order(a, modulus).ok_or_else(oracle_failed)?;
        if order == 1 {
            return Ok(if b % modulus == 1 {
                DlogOutcome::found(0, 0)
            } else {
                DlogOutcome::none(0)
            });
        }

        let factors = self.oracle.factor(order);
        let suffix = suffix_products(&factors).ok_or_else(oracle_failed)?;
        if suffix[0] != order {
            return Err(oracle_failed());
        }
        debug!(order, ?factors, "reducing to prime-order subproblems");

        let b = b % modulus;
        let mut k = 0u64;
        let mut total_trials = 0;
        for (i, &p) in factors.iter().enumerate().rev() {
            let sub_a = mod_pow(a, order / p, modulus);
            let shift = (order - k % order) % order;
            let peeled = mod_mul(b, mod_pow(a, shift, modulus), modulus);
            let sub_b = mod_pow(peeled, order / suffix[i], modulus);

            let outcome = self.solver.solve(sub_a, sub_b, modulus, p, max_trials)?;
            total_trials += outcome.trials;
            match outcome.exponent {
                Some(digit) => {
                    k += digit * suffix[i + 1];
                    info!(prime = p, digit, partial = k, "subproblem solved");
                }
                None => {
                    warn!(prime = p, total_trials, "subproblem failed, aborting reduction");
                    return Ok(DlogOutcome::none(total_trials));
                }
            }
        }

        Ok(DlogOutcome::found(k, total_trials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntheory::ClassicalOracle;
    use qdlog_backend::{LocalSimulatorBackend, LocalSimulatorConfig};

    #[test]
    fn test_suffix_products() {
        assert_eq!(suffix_products(&[2, 2, 3]), Some(vec![12, 6, 3, 1]));
        assert_eq!(suffix_products(&[]), Some(vec![1]));
        assert_eq!(suffix_products(&[u64::MAX, 2]), None);
    }

    struct BrokenOracle;

    impl GroupOracle for BrokenOracle {
        fn order(&self, _base: u64, _modulus: u64) -> Option<u64> {
            Some(4)
        }

        fn factor(&self, _n: u64) -> Vec<u64> {
            vec![3]
        }
    }

    #[test]
    fn test_inconsistent_oracle_is_an_error() {
        let backend = LocalSimulatorBackend::with_config(LocalSimulatorConfig::new().with_seed(1));
        let reducer = CompositeReducer::new(&backend, &BrokenOracle);
        let result = reducer.solve(7, 19, 30, 8);
        assert!(matches!(result, Err(DiscreteLogError::OracleFailed { .. })));
    }

    #[test]
    fn test_trivial_order_needs_no_circuit() {
        let backend = LocalSimulatorBackend::new();
        let reducer = CompositeReducer::new(&backend, &ClassicalOracle);
        assert_eq!(reducer.solve(1, 1, 15, 4).unwrap(), DlogOutcome::found(0, 0));
        assert_eq!(reducer.solve(16, 2, 15, 4).unwrap(), DlogOutcome::none(0));
    }
}
