//! Register views and control sets

use crate::{QuantumError, QubitId, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// A contiguous, non-owning view over lines of the circuit arena
///
/// Index 0 is the least significant bit of the integer the register holds.
/// Views are `Copy`; slicing never allocates lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QubitRegister {
    start: usize,
    len: usize,
}

impl QubitRegister {
    /// Create a view of `len` lines beginning at arena index `start`
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// First arena index covered by this view
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last arena index covered by this view
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of lines (bit width)
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Line holding bit `index`
    ///
    /// # Errors
    /// Returns [`QuantumError::RegisterOutOfRange`] if `index >= len`
    #[inline]
    pub fn qubit(&self, index: usize) -> Result<QubitId> {
        if index >= self.len {
            return Err(QuantumError::out_of_range(index, self.len));
        }
        Ok(QubitId::new(self.start + index))
    }

    /// Most significant line of the register
    pub fn msb(&self) -> Result<QubitId> {
        match self.len {
            0 => Err(QuantumError::out_of_range(0, 0)),
            len => self.qubit(len - 1),
        }
    }

    /// Sub-view over `range` (relative to this register)
    ///
    /// # Errors
    /// Returns [`QuantumError::RegisterOutOfRange`] if the range runs past
    /// the end of this view or is reversed.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end {
            return Err(QuantumError::out_of_range(range.start, range.end));
        }
        if range.end > self.len {
            return Err(QuantumError::out_of_range(range.end, self.len));
        }
        Ok(Self::new(self.start + range.start, range.end - range.start))
    }

    /// Lines of this register, least significant first
    pub fn qubits(&self) -> impl DoubleEndedIterator<Item = QubitId> + ExactSizeIterator {
        (self.start..self.end()).map(QubitId::new)
    }

    /// Whether `qubit` lies inside this view
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        (self.start..self.end()).contains(&qubit.index())
    }

    /// Whether the two views share at least one line
    ///
    /// An empty view overlaps nothing.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }
}

impl fmt::Display for QubitRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[q{}..q{})", self.start, self.end())
    }
}

/// An ordered set of control lines
///
/// A gate controlled on the set fires only when every line in the set is
/// |1⟩. Duplicates are rejected on construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlSet(SmallVec<[QubitId; 4]>);

impl ControlSet {
    /// The empty control set (unconditional)
    #[inline]
    pub fn empty() -> Self {
        Self(SmallVec::new())
    }

    /// A control set with a single line
    #[inline]
    pub fn single(qubit: QubitId) -> Self {
        let mut lines = SmallVec::new();
        lines.push(qubit);
        Self(lines)
    }

    /// Build a control set from a slice of lines
    ///
    /// # Errors
    /// Returns [`QuantumError::DuplicateQubit`] if a line repeats
    pub fn from_qubits(qubits: &[QubitId]) -> Result<Self> {
        let mut set = Self::empty();
        for &qubit in qubits {
            set = set.with(qubit)?;
        }
        Ok(set)
    }

    /// This set extended by one more line
    ///
    /// # Errors
    /// Returns [`QuantumError::DuplicateQubit`] if `qubit` is already present
    pub fn with(mut self, qubit: QubitId) -> Result<Self> {
        if self.contains(qubit) {
            return Err(QuantumError::DuplicateQubit(qubit));
        }
        self.0.push(qubit);
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.0.contains(&qubit)
    }

    /// Whether any control line lies inside `register`
    pub fn intersects(&self, register: &QubitRegister) -> bool {
        self.0.iter().any(|&q| register.contains(q))
    }

    #[inline]
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.0.iter().copied()
    }
}
