//! Scenario parameters for the stroke pathway model
//!
//! Each record holds the parameters for one concern of one unit (arrivals, length of
//! stay or routing) and is aggregated by [`Param`]. The set of parameter names in a
//! record is fixed when the record is built: existing parameters can be changed at
//! any time, but naming a parameter that was not part of the record is an error.
//! This keeps a misspelt name in a sensitivity analysis from being silently ignored.
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::parameters::*;
//!
//! let mut param = Param::default();
//! param.set_parameter("asu_arrivals.stroke", 2.5).unwrap();
//! assert_eq!(param.get_parameter("asu_arrivals.stroke"), Some(2.5));
//!
//! let err = param.set_parameter("asu_arrivals.strok", 2.5).unwrap_err();
//! assert!(err.to_string().contains("only possible to modify existing attributes"));
//! ```

pub mod arrivals;
pub mod los;
pub mod param;
pub mod routing;

pub use arrivals::*;
pub use los::*;
pub use param::*;
pub use routing::*;

use crate::types::{Destination, PatientType};
use thiserror::Error;

/// Tolerance used when checking that routing probabilities sum to one
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Errors raised while building, mutating or validating parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The name does not exist in the record
    #[error("Cannot set '{name}' on {record}: only possible to modify existing attributes")]
    UnknownAttribute {
        /// Record that rejected the name
        record: &'static str,
        /// The unknown name
        name: String,
    },

    /// The value is outside the valid domain for the parameter
    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidValue {
        /// Full name of the parameter
        name: String,
        /// The rejected value
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// Routing probabilities for one patient type do not sum to one
    #[error("Routing probabilities in {record} for {patient_type} must sum to 1.0, got {sum}")]
    RoutingSum {
        /// Routing record
        record: &'static str,
        /// Patient type whose probabilities are wrong
        patient_type: PatientType,
        /// Actual sum
        sum: f64,
    },

    /// A destination that the unit cannot route to
    #[error("{record} cannot route {patient_type} patients to {destination}")]
    InvalidDestination {
        /// Routing record
        record: &'static str,
        /// Patient type being routed
        patient_type: PatientType,
        /// Destination that is not allowed
        destination: Destination,
    },

    /// A parameter needed by the configured patient flow is absent
    #[error("Missing parameter {record}.{name} required by the configured patient flow")]
    MissingParameter {
        /// Record that should hold the parameter
        record: &'static str,
        /// Name of the missing parameter
        name: String,
    },

    /// A record was attached to the wrong unit
    #[error("{field} must describe the {expected} unit")]
    UnitMismatch {
        /// Field of [`Param`] holding the record
        field: &'static str,
        /// Unit the field requires
        expected: crate::types::Unit,
    },
}

/// Name-guarded access to the numeric parameters of a record
///
/// Names are dotted paths, e.g. `stroke` for an arrivals record,
/// `stroke_esd.mean` for a length-of-stay record or `asu_routing.stroke.rehab`
/// on [`Param`].
pub trait NamedParameters {
    /// Name of the record, used in error messages
    fn record_name(&self) -> &'static str;

    /// Every parameter name accepted by [`NamedParameters::set_parameter`]
    fn parameter_names(&self) -> Vec<String>;

    /// Current value of a parameter, if the name exists
    fn get_parameter(&self, name: &str) -> Option<f64>;

    /// Change an existing parameter
    ///
    /// Fails with [`ParameterError::UnknownAttribute`] when `name` was not part of
    /// the record at construction time.
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), ParameterError>;

    /// Whether `name` is a parameter of this record
    fn has_parameter(&self, name: &str) -> bool {
        self.get_parameter(name).is_some()
    }
}

/// Split `a.b.c` into `("a", Some("b.c"))`
pub(crate) fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

pub(crate) fn unknown(record: &'static str, name: &str) -> ParameterError {
    ParameterError::UnknownAttribute { record, name: name.to_string() }
}

pub(crate) fn require_positive(name: String, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ParameterError::InvalidValue { name, value, reason: "must be positive" });
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: String, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParameterError::InvalidValue { name, value, reason: "must not be negative" });
    }
    Ok(())
}

pub(crate) fn require_probability(name: String, value: f64) -> Result<(), ParameterError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ParameterError::InvalidValue {
            name,
            value,
            reason: "must be between 0.0 and 1.0",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("stroke"), ("stroke", None));
        assert_eq!(split_path("stroke_esd.mean"), ("stroke_esd", Some("mean")));
        assert_eq!(split_path("asu_routing.stroke.rehab"), ("asu_routing", Some("stroke.rehab")));
    }

    #[test]
    fn test_value_checks() {
        assert!(require_positive("x".into(), 1.0).is_ok());
        assert!(require_positive("x".into(), 0.0).is_err());
        assert!(require_positive("x".into(), f64::NAN).is_err());
        assert!(require_non_negative("x".into(), 0.0).is_ok());
        assert!(require_non_negative("x".into(), -0.1).is_err());
        assert!(require_probability("x".into(), 1.0).is_ok());
        assert!(require_probability("x".into(), 1.01).is_err());
    }

    #[test]
    fn test_unknown_attribute_message() {
        let err = unknown("ASUArrivals", "new_entry");
        assert_eq!(
            err.to_string(),
            "Cannot set 'new_entry' on ASUArrivals: only possible to modify existing attributes"
        );
    }
}
