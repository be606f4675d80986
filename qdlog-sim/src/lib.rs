//! State-vector simulator for qdlog circuits
//!
//! The simulator evolves a dense state through every unitary operation of a
//! [`Circuit`](qdlog_core::Circuit), then reads out the terminal
//! measurements. Controlled gates are never expanded to full matrices: the
//! executor folds the control lines into a bit mask and hands the target
//! operator to the `qdlog-state` kernels.
//!
//! # Example
//!
//! ```
//! use qdlog_core::CircuitBuilder;
//! use qdlog_gates::StandardGates;
//! use qdlog_sim::{Simulator, SimulatorConfig};
//!
//! let mut builder = CircuitBuilder::new();
//! let reg = builder.allocate_register("r", 2).unwrap();
//! builder.x(reg.qubit(0).unwrap()).unwrap();
//! builder.cx(reg.qubit(0).unwrap(), reg.qubit(1).unwrap()).unwrap();
//! builder.measure_register(reg).unwrap();
//! let circuit = builder.build().unwrap();
//!
//! let simulator = Simulator::new(SimulatorConfig::default().with_seed(1)).unwrap();
//! let counts = simulator.sample(&circuit, 10).unwrap();
//! assert_eq!(counts.get("11"), 10);
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod result;
pub mod simulator;
pub mod statistics;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use result::{MeasurementCounts, SimulationResult};
pub use simulator::Simulator;
pub use statistics::ExecutionStatistics;
