//! Line addressing inside the circuit's line arena

use std::fmt;

/// Index of one qubit line in a circuit
///
/// Every circuit owns a single flat arena of lines; a `QubitId` is a plain
/// position in that arena. Registers hand these out, nothing else should
/// fabricate them from raw integers.
///
/// # Example
/// ```
/// use qdlog_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// assert_eq!(q0.offset(3), QubitId::new(3));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new line identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying arena index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Line `by` positions further along the arena
    #[inline]
    pub const fn offset(&self, by: usize) -> Self {
        Self(self.0 + by)
    }

    /// Bit mask selecting this line in a basis-state index
    #[inline]
    pub const fn mask(&self) -> usize {
        1 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}
