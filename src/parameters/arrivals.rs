//! Arrival parameters
//!
//! Mean inter-arrival times (days) per patient type for one unit.

use super::{require_positive, unknown, NamedParameters, ParameterError};
use crate::types::{PatientType, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean inter-arrival times for the patient types arriving directly into a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrivals {
    unit: Unit,
    mean_iat: BTreeMap<PatientType, f64>,
}

impl Arrivals {
    /// Build a record for `unit` holding exactly the given patient types
    pub fn new(unit: Unit, mean_iat: impl IntoIterator<Item = (PatientType, f64)>) -> Self {
        Self { unit, mean_iat: mean_iat.into_iter().collect() }
    }

    /// Default arrivals into the Acute Stroke Unit
    pub fn asu_default() -> Self {
        Self::new(
            Unit::Asu,
            [
                (PatientType::Stroke, 3.0),
                (PatientType::Tia, 9.3),
                (PatientType::Neuro, 3.6),
                (PatientType::Other, 3.2),
            ],
        )
    }

    /// Default arrivals into the rehabilitation unit
    pub fn rehab_default() -> Self {
        Self::new(
            Unit::Rehab,
            [
                (PatientType::Stroke, 21.8),
                (PatientType::Tia, 41.7),
                (PatientType::Neuro, 31.7),
                (PatientType::Other, 28.6),
            ],
        )
    }

    /// Unit the record describes
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Mean inter-arrival time for a patient type
    pub fn mean_iat(&self, patient_type: PatientType) -> Option<f64> {
        self.mean_iat.get(&patient_type).copied()
    }

    /// Patient types arriving into the unit
    pub fn patient_types(&self) -> impl Iterator<Item = PatientType> + '_ {
        self.mean_iat.keys().copied()
    }

    /// Pairs of patient type and mean inter-arrival time
    pub fn iter(&self) -> impl Iterator<Item = (PatientType, f64)> + '_ {
        self.mean_iat.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of patient types in the record
    pub fn len(&self) -> usize {
        self.mean_iat.len()
    }

    /// Whether the record has no patient types
    pub fn is_empty(&self) -> bool {
        self.mean_iat.is_empty()
    }

    /// Change the mean inter-arrival time of a patient type already in the record
    pub fn set(&mut self, patient_type: PatientType, mean_iat: f64) -> Result<(), ParameterError> {
        let record = self.record_name();
        match self.mean_iat.get_mut(&patient_type) {
            Some(slot) => {
                *slot = mean_iat;
                Ok(())
            }
            None => Err(unknown(record, patient_type.as_str())),
        }
    }

    /// Check every mean is positive
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (patient_type, mean) in self.iter() {
            require_positive(format!("{}.{}", self.record_name(), patient_type.as_str()), mean)?;
        }
        Ok(())
    }
}

impl NamedParameters for Arrivals {
    fn record_name(&self) -> &'static str {
        match self.unit {
            Unit::Asu => "ASUArrivals",
            Unit::Rehab => "RehabArrivals",
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        self.patient_types().map(|pt| pt.as_str().to_string()).collect()
    }

    fn get_parameter(&self, name: &str) -> Option<f64> {
        let patient_type = name.parse::<PatientType>().ok()?;
        self.mean_iat(patient_type)
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let patient_type =
            name.parse::<PatientType>().map_err(|_| unknown(self.record_name(), name))?;
        self.set(patient_type, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let asu = Arrivals::asu_default();
        assert_eq!(asu.unit(), Unit::Asu);
        assert_eq!(asu.len(), 4);
        assert_eq!(asu.mean_iat(PatientType::Stroke), Some(3.0));
        assert_eq!(asu.mean_iat(PatientType::Other), Some(3.2));

        let rehab = Arrivals::rehab_default();
        assert_eq!(rehab.mean_iat(PatientType::Neuro), Some(31.7));
        assert!(asu.validate().is_ok());
        assert!(rehab.validate().is_ok());
    }

    #[test]
    fn test_set_existing_patient_type() {
        let mut asu = Arrivals::asu_default();
        asu.set_parameter("tia", 12.0).unwrap();
        assert_eq!(asu.get_parameter("tia"), Some(12.0));
    }

    #[test]
    fn test_cannot_add_patient_type_missing_at_construction() {
        let mut rehab = Arrivals::new(
            Unit::Rehab,
            [(PatientType::Stroke, 8.0), (PatientType::Tia, 12.0), (PatientType::Other, 20.0)],
        );
        let err = rehab.set(PatientType::Neuro, 10.0).unwrap_err();
        assert!(matches!(err, ParameterError::UnknownAttribute { record: "RehabArrivals", .. }));
        assert!(!rehab.has_parameter("neuro"));

        let err = rehab.set_parameter("new_entry", 3.0).unwrap_err();
        assert!(err.to_string().contains("only possible to modify existing attributes"));
    }

    #[test]
    fn test_validate_rejects_non_positive_mean() {
        let mut asu = Arrivals::asu_default();
        asu.set(PatientType::Stroke, -1.0).unwrap();
        assert!(matches!(asu.validate(), Err(ParameterError::InvalidValue { .. })));
    }
}
