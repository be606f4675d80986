//! Execution statistics tracking

use std::time::Duration;

/// Execution statistics for a simulation run
#[derive(Debug, Clone, Default)]
pub struct ExecutionStatistics {
    /// Total execution time
    pub total_time: Duration,

    /// Time spent initializing state
    pub initialization_time: Duration,

    /// Time spent applying gates
    pub gate_application_time: Duration,

    /// Number of unitary gates executed
    pub gates_executed: usize,

    /// Number of lines read out by measurements
    pub measured_qubits: usize,

    /// Peak memory usage (estimated, in bytes)
    pub peak_memory_bytes: usize,
}

impl ExecutionStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the gate execution rate (gates per second)
    pub fn gates_per_second(&self) -> f64 {
        let secs = self.gate_application_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.gates_executed as f64 / secs
        }
    }

    /// Get peak memory usage in MB
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / 1_000_000.0
    }
}

impl std::fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        writeln!(f, "  Total time: {:?}", self.total_time)?;
        writeln!(f, "    Initialization: {:?}", self.initialization_time)?;
        writeln!(f, "    Gate application: {:?}", self.gate_application_time)?;
        writeln!(f, "  Gates: {} ({:.0} gates/sec)", self.gates_executed, self.gates_per_second())?;
        writeln!(f, "  Measured qubits: {}", self.measured_qubits)?;
        writeln!(f, "  Peak memory: {:.2} MB", self.peak_memory_mb())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_per_second() {
        let stats = ExecutionStatistics {
            gate_application_time: Duration::from_millis(500),
            gates_executed: 1000,
            ..Default::default()
        };
        assert!((stats.gates_per_second() - 2000.0).abs() < 1e-6);
        assert_eq!(ExecutionStatistics::new().gates_per_second(), 0.0);
    }

    #[test]
    fn test_display() {
        let stats = ExecutionStatistics {
            peak_memory_bytes: 2_000_000,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Peak memory: 2.00 MB"));
    }
}
