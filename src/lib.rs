//! Stroke Capacity Simulator
//!
//! A discrete-event simulation of a two-stage stroke pathway, an Acute Stroke Unit
//! followed by a Rehabilitation unit, used to estimate how many beds each unit
//! needs.
//!
//! # Overview
//!
//! Patients of several types arrive independently into each unit, occupy a bed for
//! a lognormally distributed length of stay and are then routed onward: from the
//! ASU to rehabilitation, to early supported discharge or elsewhere. The model does
//! not cap beds. It audits occupancy at a fixed interval, and the audit trail of
//! many replications is turned into a probability-of-delay table per unit.
//!
//! ## Key Features
//!
//! - **Name-guarded parameters**: every scenario value has a fixed dotted name
//! - **Common random numbers**: one seeded stream per unit, patient type and purpose
//! - **Warm-up handling**: results only cover the data collection period
//! - **Occupancy frequency**: beds, frequency, cumulative share and probability of delay
//!
//! ## Quick Start
//!
//! ```rust
//! use stroke_capacity_sim::*;
//!
//! let mut param = Param::default();
//! param.set_parameter("warm_up_period", 30.0)?;
//! param.set_parameter("data_collection_period", 90.0)?;
//! param.set_parameter("number_of_runs", 2.0)?;
//!
//! let results = Runner::new(param).run_reps()?;
//! println!("{}", results.asu_occupancy);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: units, patient types, identifiers and configuration
//! - [`parameters`]: scenario parameter records
//! - [`distributions`]: seeded sampling streams
//! - [`patient`]: patient entity and lifecycle
//! - [`simulation`]: event list, model, runner, errors and logging
//! - [`analysis`]: occupancy frequency tables
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌───────────────┐    ┌─────────────┐
//! │ Parameters  │───►│ Distributions │───►│    Model    │
//! │             │    │ StreamFactory │    │  Scheduler  │
//! └─────────────┘    └───────────────┘    │  Patients   │
//!                                         │  Occupancy  │
//!                                         └──────┬──────┘
//!                                                │ audit trail
//! ┌─────────────┐    ┌───────────────┐    ┌──────▼──────┐
//! │    CLI      │───►│    Runner     │───►│  Analysis   │
//! └─────────────┘    └───────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod analysis;
pub mod distributions;
pub mod parameters;
pub mod patient;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    CliArgs, ConfigError, Destination, LosCategory, PatientId, PatientType, SimulationConfig, Unit,
};

// Parameters
pub use parameters::{Arrivals, LengthOfStay, NamedParameters, Param, ParameterError, Routing};

// Sampling streams
pub use distributions::{DiscreteEmpirical, Exponential, Lognormal, Sampler, StreamFactory};

// Patients
pub use patient::{Patient, PatientState, Stay};

// Analysis
pub use analysis::{get_occupancy_freq, OccupancyFrequency, OccupancyRow};

// Simulation types and functionality
pub use simulation::{
    AuditRecord, ExperimentResults, LoggingConfig, Model, RunResults, RunSummary, Runner,
    Scheduler, SimulationError, SimulationResult,
};
