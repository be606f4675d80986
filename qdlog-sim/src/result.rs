//! Simulation result types

use crate::error::Result;
use crate::statistics::ExecutionStatistics;
use qdlog_state::{sample_outcomes, DenseState};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Result of a quantum circuit simulation
#[derive(Debug)]
pub struct SimulationResult {
    /// Final quantum state after all unitary operations
    pub state: DenseState,

    /// Measured lines; position `i` is classical bit `i`
    pub measured: Vec<usize>,

    /// Execution statistics (if statistics collection was enabled)
    pub statistics: Option<ExecutionStatistics>,
}

impl SimulationResult {
    pub fn new(state: DenseState, measured: Vec<usize>) -> Self {
        Self {
            state,
            measured,
            statistics: None,
        }
    }

    /// Add execution statistics to the result
    pub fn with_statistics(mut self, stats: ExecutionStatistics) -> Self {
        self.statistics = Some(stats);
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// Exact outcome distribution of the measured lines
    pub fn measurement_probabilities(&self) -> Result<Vec<f64>> {
        Ok(self.state.marginal_probabilities(&self.measured)?)
    }

    /// Draw `shots` samples of the measured lines
    ///
    /// Bitstrings have classical bit 0 as their rightmost character. A circuit
    /// without measurements yields no counts.
    pub fn sample<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<MeasurementCounts> {
        if self.measured.is_empty() {
            return Ok(MeasurementCounts::new(0));
        }
        let probabilities = self.measurement_probabilities()?;
        let sampled = sample_outcomes(&probabilities, shots, rng)?;
        Ok(MeasurementCounts::from_counts(
            sampled.to_bitstring_counts(self.measured.len()),
        ))
    }
}

/// Measurement outcome counts
///
/// Maps bitstrings (measurement outcomes) to the number of times they were observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementCounts {
    counts: HashMap<String, usize>,
    total_shots: usize,
}

impl MeasurementCounts {
    pub fn new(total_shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            total_shots,
        }
    }

    /// Create from a counts map
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
        }
    }

    /// Add a measurement outcome
    pub fn add(&mut self, bitstring: String, count: usize) {
        *self.counts.entry(bitstring).or_insert(0) += count;
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    pub fn into_counts(self) -> HashMap<String, usize> {
        self.counts
    }

    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Get number of unique outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Outcomes sorted by frequency (descending), ties by bitstring
    pub fn sorted(&self) -> Vec<(&String, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(bs, &count)| (bs, count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        let sorted = self.sorted();
        for (bitstring, count) in sorted.iter().take(10) {
            let prob = *count as f64 / self.total_shots as f64;
            writeln!(f, "  {}: {} ({:.2}%)", bitstring, count, prob * 100.0)?;
        }

        if sorted.len() > 10 {
            writeln!(f, "  ... and {} more outcomes", sorted.len() - 10)?;
        }

        Ok(())
    }
}
