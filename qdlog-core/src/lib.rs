//! Core types and traits for the qdlog circuit synthesis stack
//!
//! This crate provides the foundation every other qdlog crate builds on:
//! - [`QubitId`]: Type-safe line addressing inside a single line arena
//! - [`QubitRegister`]: Non-owning, bounds-checked views over line ranges
//! - [`ControlSet`]: Ordered AND-set of control lines
//! - [`Gate`]: Trait for quantum operations
//! - [`Circuit`]: The append-only gate log handed to an execution backend
//! - [`CircuitBuilder`]: Register arena plus gate and sub-block log
//!
//! # Example
//! ```
//! use qdlog_core::CircuitBuilder;
//!
//! let mut builder = CircuitBuilder::new();
//! let exponent = builder.allocate_register("x", 3).unwrap();
//! let target = builder.allocate_register("target", 4).unwrap();
//!
//! assert_eq!(builder.num_qubits(), 7);
//! assert_eq!(target.start(), 3);
//! assert_eq!(exponent.qubit(2).unwrap().index(), 2);
//! ```

pub mod builder;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod register;

// Re-exports for convenience
pub use builder::{BlockKind, CircuitBuilder, RegisterInfo, SubBlock};
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{Gate, GateOp};
pub use num_complex::Complex64;
pub use qubit::QubitId;
pub use register::{ControlSet, QubitRegister};

/// Type alias for results in qdlog-core
pub type Result<T> = std::result::Result<T, QuantumError>;
