//! Error types and handling
//!
//! This module contains the error type shared by the model, the runner and the
//! occupancy analysis. Failures are never retried: a failed run returns an error
//! and no partial results.

use thiserror::Error;

use crate::distributions::DistributionError;
use crate::parameters::ParameterError;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A parameter record was rejected
    #[error("Parameter error: {0}")]
    ParameterError(#[from] ParameterError),

    /// A sampling stream could not be built
    #[error("Distribution error: {0}")]
    DistributionError(#[from] DistributionError),

    /// A patient or model was asked to make an illegal state change
    #[error("State error: {0}")]
    StateError(String),

    /// The event list was used incorrectly
    #[error("Scheduler error: {0}")]
    SchedulerError(String),

    /// Occupancy analysis precondition failed
    #[error("Analysis error: {0}")]
    AnalysisError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a state error
    pub fn state_error(msg: impl Into<String>) -> Self {
        Self::StateError(msg.into())
    }

    /// Create a scheduler error
    pub fn scheduler_error(msg: impl Into<String>) -> Self {
        Self::SchedulerError(msg.into())
    }

    /// Create an analysis error
    pub fn analysis_error(msg: impl Into<String>) -> Self {
        Self::AnalysisError(msg.into())
    }

    /// Whether the error comes from invalid configuration rather than a fault
    /// during the run
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SimulationError::ConfigurationError(_)
                | SimulationError::ParameterError(_)
                | SimulationError::DistributionError(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ParameterError(_) => "Parameter",
            SimulationError::DistributionError(_) => "Distribution",
            SimulationError::StateError(_) => "State",
            SimulationError::SchedulerError(_) => "Scheduler",
            SimulationError::AnalysisError(_) => "Analysis",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
