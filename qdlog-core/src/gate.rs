//! Gate trait and gate operations

use crate::{QuantumError, QubitId, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Trait for quantum gate operations
///
/// Gates are stateless and shared between operations through `Arc`. A gate
/// acting on `k` control lines followed by one or two target lines reports
/// `num_controls() == k`; simulators then only need the operator applied to
/// the target lines, never the full `2^(k+t)` matrix.
///
/// # Example
/// ```ignore
/// struct HadamardGate;
///
/// impl Gate for HadamardGate {
///     fn name(&self) -> &str { "H" }
///     fn num_qubits(&self) -> usize { 1 }
///     fn is_hermitian(&self) -> bool { true }
/// }
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CP", "CSWAP")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on, controls included
    fn num_qubits(&self) -> usize;

    /// Whether this gate is a unitary operation
    ///
    /// Measurement is the only non-unitary gate in this stack.
    fn is_unitary(&self) -> bool {
        true
    }

    /// Whether this gate is hermitian (self-adjoint)
    fn is_hermitian(&self) -> bool {
        false
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("{}-qubit gate '{}'", self.num_qubits(), self.name())
    }

    /// Full unitary matrix as a flattened row-major vector
    ///
    /// The first qubit of the operation is the most significant bit of the
    /// row/column index. Returns `None` for non-unitary gates.
    fn matrix(&self) -> Option<Vec<Complex64>> {
        None
    }

    /// Number of leading qubits that act purely as controls
    fn num_controls(&self) -> usize {
        0
    }

    /// Operator applied to the non-control qubits when every control is |1⟩
    ///
    /// Row-major, flattened, of dimension `2^(num_qubits - num_controls)`.
    fn target_matrix(&self) -> Option<Vec<Complex64>> {
        if self.num_controls() == 0 {
            self.matrix()
        } else {
            None
        }
    }
}

/// A gate operation applied to specific qubits
///
/// # Example
/// ```
/// # use qdlog_core::{QubitId, gate::GateOp};
/// # use std::sync::Arc;
/// # #[derive(Debug)]
/// # struct DummyGate;
/// # impl qdlog_core::gate::Gate for DummyGate {
/// #     fn name(&self) -> &str { "DUMMY" }
/// #     fn num_qubits(&self) -> usize { 1 }
/// # }
/// let gate = Arc::new(DummyGate);
/// let op = GateOp::new(gate, &[QubitId::new(0)]).unwrap();
/// assert_eq!(op.num_qubits(), 1);
/// ```
#[derive(Clone)]
pub struct GateOp {
    gate: Arc<dyn Gate>,
    qubits: SmallVec<[QubitId; 4]>, // controlled phases reach 3 lines, CSWAP 3
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if:
    /// - Qubit count doesn't match gate requirements
    /// - Duplicate qubits specified
    pub fn new(gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                qubits.len(),
            ));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Get the qubits this operation acts on
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Control lines of this operation
    #[inline]
    pub fn controls(&self) -> &[QubitId] {
        &self.qubits[..self.gate.num_controls()]
    }

    /// Target lines of this operation
    #[inline]
    pub fn targets(&self) -> &[QubitId] {
        &self.qubits[self.gate.num_controls()..]
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
