//! Routing parameters
//!
//! Probability of each destination after a stay, per patient type, for one unit.

use super::{
    require_probability, split_path, unknown, NamedParameters, ParameterError,
    PROBABILITY_TOLERANCE,
};
use crate::types::{Destination, PatientType, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Destination probabilities for one patient type
pub type DestinationProbabilities = BTreeMap<Destination, f64>;

/// Routing probabilities for the patient types treated in a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routing {
    unit: Unit,
    probabilities: BTreeMap<PatientType, DestinationProbabilities>,
}

impl Routing {
    /// Build a record for `unit` holding exactly the given patient types and destinations
    pub fn new<I, D>(unit: Unit, probabilities: I) -> Self
    where
        I: IntoIterator<Item = (PatientType, D)>,
        D: IntoIterator<Item = (Destination, f64)>,
    {
        Self {
            unit,
            probabilities: probabilities
                .into_iter()
                .map(|(pt, dests)| (pt, dests.into_iter().collect()))
                .collect(),
        }
    }

    /// Default routing out of the Acute Stroke Unit
    pub fn asu_default() -> Self {
        use Destination::*;
        Self::new(
            Unit::Asu,
            [
                (PatientType::Stroke, [(Rehab, 0.24), (Esd, 0.13), (Other, 0.63)]),
                (PatientType::Tia, [(Rehab, 0.01), (Esd, 0.01), (Other, 0.98)]),
                (PatientType::Neuro, [(Rehab, 0.11), (Esd, 0.05), (Other, 0.84)]),
                (PatientType::Other, [(Rehab, 0.05), (Esd, 0.10), (Other, 0.85)]),
            ],
        )
    }

    /// Default routing out of the rehabilitation unit
    pub fn rehab_default() -> Self {
        use Destination::*;
        Self::new(
            Unit::Rehab,
            [
                (PatientType::Stroke, [(Esd, 0.40), (Other, 0.60)]),
                (PatientType::Tia, [(Esd, 0.0), (Other, 1.0)]),
                (PatientType::Neuro, [(Esd, 0.09), (Other, 0.91)]),
                (PatientType::Other, [(Esd, 0.13), (Other, 0.87)]),
            ],
        )
    }

    /// Unit the record describes
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Destination probabilities for a patient type
    pub fn destinations(&self, patient_type: PatientType) -> Option<&DestinationProbabilities> {
        self.probabilities.get(&patient_type)
    }

    /// Probability that a patient type is routed to a destination
    pub fn probability(&self, patient_type: PatientType, destination: Destination) -> Option<f64> {
        self.destinations(patient_type)?.get(&destination).copied()
    }

    /// Patient types covered by the record
    pub fn patient_types(&self) -> impl Iterator<Item = PatientType> + '_ {
        self.probabilities.keys().copied()
    }

    /// Change an existing routing probability
    pub fn set(
        &mut self,
        patient_type: PatientType,
        destination: Destination,
        probability: f64,
    ) -> Result<(), ParameterError> {
        let record = self.record_name();
        let name = format!("{}.{}", patient_type.as_str(), destination.as_str());
        let slot = self
            .probabilities
            .get_mut(&patient_type)
            .and_then(|dests| dests.get_mut(&destination))
            .ok_or_else(|| unknown(record, &name))?;
        *slot = probability;
        Ok(())
    }

    /// Check probabilities are in range, sum to one and only name reachable destinations
    pub fn validate(&self) -> Result<(), ParameterError> {
        let record = self.record_name();
        for (patient_type, dests) in &self.probabilities {
            let mut sum = 0.0;
            for (destination, p) in dests {
                if self.unit == Unit::Rehab && *destination == Destination::Rehab {
                    return Err(ParameterError::InvalidDestination {
                        record,
                        patient_type: *patient_type,
                        destination: *destination,
                    });
                }
                require_probability(
                    format!("{}.{}.{}", record, patient_type.as_str(), destination.as_str()),
                    *p,
                )?;
                sum += p;
            }
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(ParameterError::RoutingSum { record, patient_type: *patient_type, sum });
            }
        }
        Ok(())
    }
}

impl NamedParameters for Routing {
    fn record_name(&self) -> &'static str {
        match self.unit {
            Unit::Asu => "ASURouting",
            Unit::Rehab => "RehabRouting",
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        self.probabilities
            .iter()
            .flat_map(|(pt, dests)| {
                dests.keys().map(move |d| format!("{}.{}", pt.as_str(), d.as_str()))
            })
            .collect()
    }

    fn get_parameter(&self, name: &str) -> Option<f64> {
        let (patient_type, destination) = split_path(name);
        self.probability(patient_type.parse().ok()?, destination?.parse().ok()?)
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let record = self.record_name();
        let (patient_type, destination) = split_path(name);
        let patient_type =
            patient_type.parse::<PatientType>().map_err(|_| unknown(record, name))?;
        let destination = destination
            .and_then(|d| d.parse::<Destination>().ok())
            .ok_or_else(|| unknown(record, name))?;
        self.set(patient_type, destination, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Routing::asu_default().validate().is_ok());
        assert!(Routing::rehab_default().validate().is_ok());
        assert_eq!(
            Routing::asu_default().probability(PatientType::Stroke, Destination::Rehab),
            Some(0.24)
        );
        assert_eq!(Routing::rehab_default().probability(PatientType::Stroke, Destination::Rehab), None);
    }

    #[test]
    fn test_sum_must_be_one() {
        let mut asu = Routing::asu_default();
        asu.set(PatientType::Stroke, Destination::Rehab, 0.5).unwrap();
        match asu.validate() {
            Err(ParameterError::RoutingSum { patient_type, sum, .. }) => {
                assert_eq!(patient_type, PatientType::Stroke);
                assert!((sum - 1.26).abs() < 1e-9);
            }
            other => panic!("Expected RoutingSum error, got {:?}", other),
        }
    }

    #[test]
    fn test_rehab_cannot_route_to_rehab() {
        let rehab = Routing::new(
            Unit::Rehab,
            [(PatientType::Stroke, [(Destination::Rehab, 0.5), (Destination::Other, 0.5)])],
        );
        assert!(matches!(rehab.validate(), Err(ParameterError::InvalidDestination { .. })));
    }

    #[test]
    fn test_named_parameters() {
        let mut rehab = Routing::rehab_default();
        rehab.set_parameter("neuro.esd", 0.2).unwrap();
        rehab.set_parameter("neuro.other", 0.8).unwrap();
        assert_eq!(rehab.get_parameter("neuro.esd"), Some(0.2));
        assert!(rehab.validate().is_ok());

        assert!(rehab.set_parameter("neuro.rehab", 0.1).is_err());
        assert!(rehab.set_parameter("neuro", 0.1).is_err());
        let err = rehab.set_parameter("new_entry", 3.0).unwrap_err();
        assert!(err.to_string().contains("only possible to modify existing attributes"));
    }
}
