//! Random variate streams
//!
//! This module contains the sampling distributions used by the model and the
//! factory that builds one independently seeded stream per unit, patient type and
//! purpose.
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::distributions::*;
//! use stroke_capacity_sim::parameters::Arrivals;
//! use stroke_capacity_sim::types::PatientType;
//!
//! let factory = StreamFactory::new(123);
//! let mut streams = factory.arrival_streams(&Arrivals::asu_default()).unwrap();
//! let stroke = streams.get_mut(&PatientType::Stroke).unwrap();
//! let next_arrival = stroke.sample();
//! assert!(next_arrival >= 0.0);
//! ```

pub mod factory;
pub mod sampling;

pub use factory::*;
pub use sampling::*;
