//! Patient modeling and lifecycle management
//!
//! This module contains the patient entity, its stay history and the lifecycle
//! state machine driven by the model.
//!
//! # Overview
//!
//! - **Patient**: identity, type, arrival details and every stay so far
//! - **Stay**: one bed occupation with its sampled length of stay and destination
//! - **PatientState**: lifecycle states with validated transitions
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::patient::*;
//! use stroke_capacity_sim::types::*;
//!
//! let mut patient = Patient::new(PatientId(0), PatientType::Tia, Unit::Asu, 0.0);
//! patient.admit(Unit::Asu, 0.0, LosCategory::Tia, 1.5, Destination::Other).unwrap();
//! assert_eq!(patient.end_stay(1.5).unwrap(), Destination::Other);
//! patient.depart().unwrap();
//! assert_eq!(patient.state(), PatientState::Departed);
//! ```

#[allow(clippy::module_inception)]
pub mod patient;
pub mod state;

pub use patient::*;
pub use state::*;
