//! Dense quantum state representation for qdlog
//!
//! - [`DenseState`]: full `2^n` amplitude vector, qubit 0 is the least
//!   significant bit of the basis index
//! - [`kernels`]: controlled single- and two-target gate kernels, switching to
//!   rayon above a qubit-count threshold
//! - [`measurement`]: marginal distributions and multi-shot sampling
//!
//! # Example
//!
//! ```
//! use qdlog_state::DenseState;
//! use num_complex::Complex64;
//!
//! let x = [
//!     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
//! ];
//! let mut state = DenseState::new(3).unwrap();
//! state.apply_single_qubit_gate(&x, 1).unwrap();
//! // control on qubit 1, flip qubit 2
//! state.apply_controlled_gate(0b010, 2, &x).unwrap();
//!
//! assert_eq!(state.basis_state_of(&[0, 1, 2], 1e-9), Some(0b110));
//! ```

pub mod dense_state;
pub mod error;
pub mod kernels;
pub mod measurement;

pub use dense_state::DenseState;
pub use error::{Result, StateError};
pub use kernels::{Matrix2x2, Matrix4x4};
pub use measurement::{sample_outcomes, SamplingResult};
