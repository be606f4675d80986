//! Quantum gate library for qdlog
//!
//! Provides the handful of gates the modular-arithmetic circuits are built
//! from, plus a [`StandardGates`] extension trait so synthesis code can write
//! `builder.h(q)?` instead of wiring `Arc<dyn Gate>` by hand.
//!
//! # Example
//!
//! ```
//! use qdlog_core::CircuitBuilder;
//! use qdlog_gates::StandardGates;
//!
//! let mut builder = CircuitBuilder::new();
//! let reg = builder.allocate_register("x", 3).unwrap();
//! builder.qft(reg, false).unwrap();
//! builder.iqft(reg, false).unwrap();
//!
//! assert_eq!(builder.blocks().len(), 2);
//! // 3 Hadamards and 3 controlled phases per transform
//! assert_eq!(builder.num_operations(), 12);
//! ```

pub mod builder;
pub mod matrices;
pub mod standard;

// Re-export commonly used items
pub use builder::StandardGates;
pub use standard::*;
