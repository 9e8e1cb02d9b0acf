//! Core types and identifiers for the stroke capacity simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential patient identifiers, stable across equal runs
//! - **Enums**: units, patient types, routing destinations and length-of-stay categories
//! - **Configuration**: experiment configuration with CLI and JSON file support
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::types::*;
//!
//! let mut ids = PatientIdGenerator::new();
//! assert_eq!(ids.next_id().to_string(), "PAT_000000");
//!
//! let category = LosCategory::for_stay(Unit::Asu, PatientType::Stroke, Destination::Esd);
//! assert_eq!(category, LosCategory::StrokeEsd);
//!
//! let config = SimulationConfig::default();
//! assert_eq!(config.param.number_of_runs, 150);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
