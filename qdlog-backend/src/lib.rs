//! Execution backends for qdlog circuits
//!
//! Circuit synthesis never talks to a simulator directly. It hands a finished
//! [`Circuit`](qdlog_core::Circuit) and a shot count to a [`QuantumBackend`]
//! and gets back a multiset of measured bitstrings. The crate ships one
//! implementation, [`LocalSimulatorBackend`], an ideal noiseless sampler.

pub mod backend;
pub mod capabilities;
pub mod error;
pub mod local_simulator;
pub mod result;

pub use backend::{BackendType, QuantumBackend};
pub use capabilities::{BackendCapabilities, GateSet};
pub use error::{BackendError, Result};
pub use local_simulator::{LocalSimulatorBackend, LocalSimulatorConfig};
pub use result::{BackendResult, ExecutionMetadata};
