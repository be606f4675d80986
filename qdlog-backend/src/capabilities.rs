//! Backend capabilities and constraints

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Capabilities of a quantum backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCapabilities {
    /// Maximum number of qubits supported
    pub max_qubits: usize,

    /// Maximum number of shots per job (None = unlimited)
    pub max_shots: Option<usize>,

    /// Widest control fan-in a single operation may have (None = unlimited)
    pub max_controls: Option<usize>,

    /// Supported gate set
    pub supported_gates: GateSet,

    /// Whether the backend supports mid-circuit measurement
    pub supports_mid_circuit_measurement: bool,

    /// Backend-specific metadata
    pub metadata: HashMap<String, String>,
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self {
            max_qubits: 30,
            max_shots: None,
            max_controls: None,
            supported_gates: GateSet::universal(),
            supports_mid_circuit_measurement: false,
            metadata: HashMap::new(),
        }
    }
}

impl BackendCapabilities {
    /// Create capabilities for a perfect simulator
    pub fn simulator() -> Self {
        Self::default()
    }

    /// Check if a gate name is supported
    pub fn supports_gate(&self, name: &str) -> bool {
        self.supported_gates.contains(name)
    }
}

/// Set of gate names a backend understands
///
/// Multi-controlled variants are matched by stripping their control prefix,
/// so supporting `P` also covers `CP`, `CCP` and `C5P`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    gates: BTreeSet<String>,
}

impl GateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every gate the qdlog synthesis emits
    pub fn universal() -> Self {
        let mut set = Self::new();
        for name in ["H", "X", "P", "CNOT", "SWAP", "CSWAP", "MEASURE"] {
            set.insert(name);
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.gates.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        let mut rest = name;
        loop {
            if self.gates.contains(rest) {
                return true;
            }
            match rest.strip_prefix('C') {
                Some(stripped) => {
                    rest = stripped.trim_start_matches(|c: char| c.is_ascii_digit());
                    if rest.is_empty() {
                        return false;
                    }
                }
                None => return false,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.gates.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_covers_controlled_variants() {
        let gates = GateSet::universal();
        assert!(gates.contains("H"));
        assert!(gates.contains("CP"));
        assert!(gates.contains("CCP"));
        assert!(gates.contains("C4P"));
        assert!(gates.contains("CSWAP"));
        assert!(gates.contains("CCNOT"));
        assert!(!gates.contains("RZ"));
    }

    #[test]
    fn test_restricted_set() {
        let mut gates = GateSet::new();
        gates.insert("H");
        assert!(!gates.contains("P"));
        assert!(!gates.contains("CP"));
        assert_eq!(gates.len(), 1);
    }

    #[test]
    fn test_simulator_defaults() {
        let caps = BackendCapabilities::simulator();
        assert_eq!(caps.max_qubits, 30);
        assert!(caps.supports_gate("CCP"));
        assert!(!caps.supports_mid_circuit_measurement);
    }
}
