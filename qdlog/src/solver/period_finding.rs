//! Prime-order discrete logarithms by two-register phase estimation
//!
//! For `b = a^t` the state `Σ |x⟩|y⟩|a^x·b^y⟩` has eigenphases `s/r` on the
//! first register and `s·t/r` on the second. Measuring both after an
//! inverse Fourier transform and rounding to multiples of `1/r` yields
//! `k = s` and `k·t mod r`, from which `t` follows whenever `k != 0`.

use super::DlogOutcome;
use crate::arith::power_mod_n;
use crate::error::{DiscreteLogError, Result};
use crate::ntheory::{bit_width, ceil_log2, gcd, mod_inverse, mod_mul, mod_pow};
use qdlog_backend::QuantumBackend;
use qdlog_core::{Circuit, CircuitBuilder, QubitRegister};
use qdlog_gates::StandardGates;
use tracing::{debug, instrument, trace, warn};

/// Register layout of a phase-estimation circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEstimationLayout {
    /// Exponent register driven by `a`, measured first
    pub x: QubitRegister,
    /// Exponent register driven by `b`, measured second
    pub y: QubitRegister,
    /// Accumulates `a^x · b^y mod N`, prepared as 1
    pub target: QubitRegister,
    /// Zeroed scratch block for the multipliers
    pub aux: QubitRegister,
}

impl PhaseEstimationLayout {
    /// Width of each exponent register
    pub fn exponent_width(&self) -> usize {
        self.x.len()
    }

    /// Width of the target register
    pub fn target_width(&self) -> usize {
        self.target.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.x.len() + self.y.len() + self.target.len() + self.aux.len()
    }
}

/// Split a measured bitstring into `(y, x)`
///
/// Classical bit 0 is the rightmost character and `x` was measured first,
/// so the leading `m` characters are `y` and the trailing `m` are `x`.
pub fn decode_outcome(bitstring: &str, m: usize) -> Result<(u64, u64)> {
    let malformed = || DiscreteLogError::MalformedOutcome(bitstring.to_string());
    if bitstring.len() != 2 * m || !bitstring.bytes().all(|c| c == b'0' || c == b'1') {
        return Err(malformed());
    }
    let (y_bits, x_bits) = bitstring.split_at(m);
    let y = u64::from_str_radix(y_bits, 2).map_err(|_| malformed())?;
    let x = u64::from_str_radix(x_bits, 2).map_err(|_| malformed())?;
    Ok((y, x))
}

/// `round(value · order / 2^m) mod order`
fn nearest_multiple(value: u64, m: usize, order: u64) -> u64 {
    let half = 1u128 << (m - 1);
    let rounded = (value as u128 * order as u128 + half) >> m;
    (rounded % order as u128) as u64
}

/// Candidate exponent from one `(x, y)` measurement
///
/// `None` when `x` rounds to the trivial eigenphase or the rounded value has
/// no inverse modulo `order`.
pub fn candidate_exponent(x: u64, y: u64, m: usize, order: u64) -> Option<u64> {
    if m == 0 || order == 0 {
        return None;
    }
    let k = nearest_multiple(x, m, order);
    if k == 0 {
        return None;
    }
    let kt = nearest_multiple(y, m, order);
    let k_inv = mod_inverse(k, order)?;
    Some(mod_mul(k_inv, kt, order))
}

/// Solves `a^t ≡ b (mod N)` when `a` has prime order `r`
///
/// The backend is borrowed; one circuit is submitted per call with
/// `max_trials` shots and every shot counts as one trial.
pub struct PeriodFindingSolver<'b, B: QuantumBackend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: QuantumBackend + ?Sized> PeriodFindingSolver<'b, B> {
    pub fn new(backend: &'b B) -> Self {
        Self { backend }
    }

    /// Assemble the phase-estimation circuit for `(a, b, modulus, order)`
    ///
    /// Uses `n = bit_width(modulus)` target lines and `m = ceil_log2(order) + 1`
    /// lines per exponent register, `2(m + n + 1)` lines in all.
    pub fn build_circuit(
        a: u64,
        b: u64,
        modulus: u64,
        order: u64,
    ) -> Result<(Circuit, PhaseEstimationLayout)> {
        let n = bit_width(modulus);
        let m = ceil_log2(order) + 1;

        let mut builder = CircuitBuilder::new();
        let layout = PhaseEstimationLayout {
            x: builder.allocate_register("x", m)?,
            y: builder.allocate_register("y", m)?,
            target: builder.allocate_register("target", n)?,
            aux: builder.allocate_register("aux", n + 2)?,
        };

        builder.h_register(layout.x)?;
        builder.h_register(layout.y)?;
        builder.x(layout.target.qubit(0)?)?;

        power_mod_n(&mut builder, layout.x, layout.target, a, m, n, modulus, layout.aux)?;
        power_mod_n(&mut builder, layout.y, layout.target, b, m, n, modulus, layout.aux)?;

        builder.iqft(layout.x, true)?;
        builder.iqft(layout.y, true)?;
        builder.measure_register(layout.x)?;
        builder.measure_register(layout.y)?;

        let circuit = builder.build()?;
        debug!(
            a,
            b,
            modulus,
            order,
            qubits = circuit.num_qubits(),
            gates = circuit.len(),
            gate_counts = ?circuit.gate_counts(),
            "phase-estimation circuit built"
        );
        Ok((circuit, layout))
    }

    /// Find `t` with `a^t ≡ b (mod modulus)`, `a` of prime order `order`
    ///
    /// `order` is trusted to be prime; it is only checked to annihilate `a`.
    /// Outcomes are tried in descending count order (ties by bitstring) and
    /// the first candidate that verifies classically is returned along with
    /// the number of shots consumed to reach it.
    ///
    /// # Errors
    /// Fails on `modulus < 2`, `max_trials == 0`, `a` not invertible, an
    /// order below 2 or one with `a^order != 1`.
    #[instrument(level = "debug", skip(self), fields(backend = self.backend.name()))]
    pub fn solve(
        &self,
        a: u64,
        b: u64,
        modulus: u64,
        order: u64,
        max_trials: usize,
    ) -> Result<DlogOutcome> {
        if modulus < 2 {
            return Err(DiscreteLogError::ModulusTooSmall(modulus));
        }
        if max_trials == 0 {
            return Err(DiscreteLogError::NoTrials);
        }
        if gcd(a, modulus) != 1 {
            return Err(DiscreteLogError::NotInvertible { value: a, modulus });
        }
        if order < 2 {
            return Err(DiscreteLogError::InvalidOrder(order));
        }
        if mod_pow(a, order, modulus) != 1 {
            return Err(DiscreteLogError::OrderMismatch {
                base: a,
                order,
                modulus,
            });
        }
        if gcd(b, modulus) != 1 {
            debug!("b is not invertible, no logarithm");
            return Ok(DlogOutcome::none(0));
        }

        let (circuit, layout) = Self::build_circuit(a, b, modulus, order)?;
        let result = self.backend.execute(&circuit, max_trials)?;
        let m = layout.exponent_width();
        let target = b % modulus;

        let mut consumed = 0;
        for (bitstring, count) in result.sorted_counts() {
            let (y, x) = decode_outcome(bitstring, m)?;
            match candidate_exponent(x, y, m, order) {
                Some(t) if mod_pow(a, t, modulus) == target => {
                    debug!(t, outcome = %bitstring, trials = consumed + 1, "candidate verified");
                    return Ok(DlogOutcome::found(t, consumed + 1));
                }
                candidate => {
                    trace!(outcome = %bitstring, count, ?candidate, "outcome rejected");
                    consumed += count;
                }
            }
        }

        warn!(a, b, modulus, order, max_trials, "trial budget exhausted");
        Ok(DlogOutcome::none(max_trials))
    }
}
