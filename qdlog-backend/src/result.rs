//! Backend execution results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Result of executing a circuit on a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResult {
    /// Measurement counts: bitstring -> count
    pub counts: HashMap<String, usize>,

    /// Total number of shots executed
    pub shots: usize,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

impl BackendResult {
    /// Create a new backend result
    pub fn new(counts: HashMap<String, usize>, shots: usize) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata::default(),
        }
    }

    /// Get the most frequent measurement outcome
    pub fn most_frequent(&self) -> Option<(&String, usize)> {
        self.sorted_counts().into_iter().next()
    }

    /// Get probability distribution (counts normalized by total shots)
    pub fn probabilities(&self) -> HashMap<String, f64> {
        if self.shots == 0 {
            return HashMap::new();
        }
        self.counts
            .iter()
            .map(|(bitstring, &count)| (bitstring.clone(), count as f64 / self.shots as f64))
            .collect()
    }

    /// Get the count for a specific bitstring
    pub fn get_count(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Outcomes by descending count, ties broken by bitstring
    ///
    /// This is the order in which post-processing consumes outcomes, so it
    /// must not depend on hash-map iteration order.
    pub fn sorted_counts(&self) -> Vec<(&String, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(bs, &count)| (bs, count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// Merge results from another execution of the same circuit
    pub fn merge(&mut self, other: &BackendResult) {
        for (bitstring, &count) in &other.counts {
            *self.counts.entry(bitstring.clone()).or_insert(0) += count;
        }
        self.shots += other.shots;
    }
}

/// Execution metadata
///
/// Failed runs surface as errors, so metadata always describes a completed
/// execution. Fields are `None` when the producer did not record them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Execution time (wall clock)
    pub execution_time: Option<Duration>,

    /// Backend name
    pub backend_name: Option<String>,

    /// Number of qubits used
    pub num_qubits: Option<usize>,

    /// Total gate count
    pub gate_count: Option<usize>,
}

impl ExecutionMetadata {
    pub fn new(backend_name: String, execution_time: Duration) -> Self {
        Self {
            execution_time: Some(execution_time),
            backend_name: Some(backend_name),
            ..Default::default()
        }
    }
}
