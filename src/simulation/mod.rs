//! Simulation model and control
//!
//! This module contains the event list, the occupancy audit, the stroke pathway
//! model, the replication runner, and the error and logging infrastructure they
//! share.
//!
//! # Overview
//!
//! - **Scheduler**: binary-heap event list ordered by time, first-scheduled-first-processed on ties
//! - **Occupancy / AuditRecord**: per-unit bed counters and their periodic snapshots
//! - **Model**: one replication of the pathway, driven to the end of data collection
//! - **Runner**: runs replications and pools their occupancy audits
//! - **SimulationError**: error type shared by every simulation operation
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::parameters::Param;
//! use stroke_capacity_sim::simulation::*;
//! use stroke_capacity_sim::types::Unit;
//!
//! let param = Param {
//!     warm_up_period: 10.0,
//!     data_collection_period: 30.0,
//!     ..Default::default()
//! };
//!
//! let mut model = Model::new(param, 0).unwrap();
//! model.run().unwrap();
//! assert_eq!(model.now(), 40.0);
//!
//! let table = Runner::get_occupancy_freq(model.audit_list(), Unit::Asu);
//! assert_eq!(table.total(), 40);
//! ```

pub mod audit;
pub mod error;
pub mod logging;
pub mod model;
pub mod runner;
pub mod scheduler;

// Re-export all public types for convenience
pub use audit::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use runner::*;
pub use scheduler::*;
