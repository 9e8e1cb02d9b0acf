//! Aggregate scenario parameters

use super::{
    require_non_negative, require_positive, split_path, unknown, Arrivals, LengthOfStay,
    NamedParameters, ParameterError, Routing,
};
use crate::types::{Destination, LosCategory, PatientType, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const SCALAR_NAMES: [&str; 4] =
    ["warm_up_period", "data_collection_period", "audit_interval", "number_of_runs"];

const RECORD_NAMES: [&str; 6] =
    ["asu_arrivals", "rehab_arrivals", "asu_los", "rehab_los", "asu_routing", "rehab_routing"];

/// Every parameter of a scenario
///
/// Times are in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Arrivals into the Acute Stroke Unit
    pub asu_arrivals: Arrivals,
    /// Direct arrivals into the rehabilitation unit
    pub rehab_arrivals: Arrivals,
    /// Lengths of stay on the Acute Stroke Unit
    pub asu_los: LengthOfStay,
    /// Lengths of stay on the rehabilitation unit
    pub rehab_los: LengthOfStay,
    /// Routing out of the Acute Stroke Unit
    pub asu_routing: Routing,
    /// Routing out of the rehabilitation unit
    pub rehab_routing: Routing,
    /// Simulated time before results are collected
    pub warm_up_period: f64,
    /// Simulated time over which results are collected
    pub data_collection_period: f64,
    /// Time between occupancy audits
    pub audit_interval: f64,
    /// Number of replications run by the runner
    pub number_of_runs: usize,
}

impl Default for Param {
    fn default() -> Self {
        Self {
            asu_arrivals: Arrivals::asu_default(),
            rehab_arrivals: Arrivals::rehab_default(),
            asu_los: LengthOfStay::asu_default(),
            rehab_los: LengthOfStay::rehab_default(),
            asu_routing: Routing::asu_default(),
            rehab_routing: Routing::rehab_default(),
            warm_up_period: 365.0 * 3.0,
            data_collection_period: 365.0 * 5.0,
            audit_interval: 1.0,
            number_of_runs: 150,
        }
    }
}

impl Param {
    /// Arrival parameters of a unit
    pub fn arrivals(&self, unit: Unit) -> &Arrivals {
        match unit {
            Unit::Asu => &self.asu_arrivals,
            Unit::Rehab => &self.rehab_arrivals,
        }
    }

    /// Length-of-stay parameters of a unit
    pub fn los(&self, unit: Unit) -> &LengthOfStay {
        match unit {
            Unit::Asu => &self.asu_los,
            Unit::Rehab => &self.rehab_los,
        }
    }

    /// Routing parameters of a unit
    pub fn routing(&self, unit: Unit) -> &Routing {
        match unit {
            Unit::Asu => &self.asu_routing,
            Unit::Rehab => &self.rehab_routing,
        }
    }

    /// Total simulated run length
    pub fn run_length(&self) -> f64 {
        self.warm_up_period + self.data_collection_period
    }

    /// Patient types that can occupy a bed in `unit`
    ///
    /// For the rehabilitation unit this covers direct arrivals plus any ASU patient
    /// type with a non-zero chance of transfer.
    pub fn patient_types_in(&self, unit: Unit) -> BTreeSet<PatientType> {
        let mut types: BTreeSet<PatientType> = self.arrivals(unit).patient_types().collect();
        if unit == Unit::Rehab {
            types.extend(self.asu_arrivals.patient_types().filter(|pt| {
                self.asu_routing.probability(*pt, Destination::Rehab).unwrap_or(0.0) > 0.0
            }));
        }
        types
    }

    /// Validate every parameter and check the patient flow is fully specified
    pub fn validate(&self) -> Result<(), ParameterError> {
        let placement: [(&'static str, Unit, Unit); 6] = [
            ("asu_arrivals", self.asu_arrivals.unit(), Unit::Asu),
            ("rehab_arrivals", self.rehab_arrivals.unit(), Unit::Rehab),
            ("asu_los", self.asu_los.unit(), Unit::Asu),
            ("rehab_los", self.rehab_los.unit(), Unit::Rehab),
            ("asu_routing", self.asu_routing.unit(), Unit::Asu),
            ("rehab_routing", self.rehab_routing.unit(), Unit::Rehab),
        ];
        for (field, actual, expected) in placement {
            if actual != expected {
                return Err(ParameterError::UnitMismatch { field, expected });
            }
        }

        for unit in Unit::ALL {
            self.arrivals(unit).validate()?;
            self.los(unit).validate()?;
            self.routing(unit).validate()?;
        }

        require_non_negative("warm_up_period".into(), self.warm_up_period)?;
        require_non_negative("data_collection_period".into(), self.data_collection_period)?;
        require_positive("audit_interval".into(), self.audit_interval)?;
        if self.number_of_runs == 0 {
            return Err(ParameterError::InvalidValue {
                name: "number_of_runs".into(),
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        self.validate_coverage()
    }

    /// Every patient type present in a unit needs routing and a length of stay for
    /// each destination it can be routed to
    fn validate_coverage(&self) -> Result<(), ParameterError> {
        for unit in Unit::ALL {
            let routing = self.routing(unit);
            let los = self.los(unit);
            for patient_type in self.patient_types_in(unit) {
                let dests = routing.destinations(patient_type).ok_or_else(|| {
                    ParameterError::MissingParameter {
                        record: routing.record_name(),
                        name: patient_type.as_str().to_string(),
                    }
                })?;
                for (destination, p) in dests {
                    if *p <= 0.0 {
                        continue;
                    }
                    let category = LosCategory::for_stay(unit, patient_type, *destination);
                    if los.get(category).is_none() {
                        return Err(ParameterError::MissingParameter {
                            record: los.record_name(),
                            name: category.as_str().to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn record(&self, name: &str) -> Option<&dyn NamedParameters> {
        let record: &dyn NamedParameters = match name {
            "asu_arrivals" => &self.asu_arrivals,
            "rehab_arrivals" => &self.rehab_arrivals,
            "asu_los" => &self.asu_los,
            "rehab_los" => &self.rehab_los,
            "asu_routing" => &self.asu_routing,
            "rehab_routing" => &self.rehab_routing,
            _ => return None,
        };
        Some(record)
    }

    fn record_mut(&mut self, name: &str) -> Option<&mut dyn NamedParameters> {
        let record: &mut dyn NamedParameters = match name {
            "asu_arrivals" => &mut self.asu_arrivals,
            "rehab_arrivals" => &mut self.rehab_arrivals,
            "asu_los" => &mut self.asu_los,
            "rehab_los" => &mut self.rehab_los,
            "asu_routing" => &mut self.asu_routing,
            "rehab_routing" => &mut self.rehab_routing,
            _ => return None,
        };
        Some(record)
    }
}

impl NamedParameters for Param {
    fn record_name(&self) -> &'static str {
        "Param"
    }

    fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = SCALAR_NAMES.iter().map(|s| s.to_string()).collect();
        for record in RECORD_NAMES {
            if let Some(params) = self.record(record) {
                names.extend(params.parameter_names().into_iter().map(|n| format!("{}.{}", record, n)));
            }
        }
        names
    }

    fn get_parameter(&self, name: &str) -> Option<f64> {
        match split_path(name) {
            ("warm_up_period", None) => Some(self.warm_up_period),
            ("data_collection_period", None) => Some(self.data_collection_period),
            ("audit_interval", None) => Some(self.audit_interval),
            ("number_of_runs", None) => Some(self.number_of_runs as f64),
            (record, Some(rest)) => self.record(record)?.get_parameter(rest),
            _ => None,
        }
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        match split_path(name) {
            ("warm_up_period", None) => self.warm_up_period = value,
            ("data_collection_period", None) => self.data_collection_period = value,
            ("audit_interval", None) => self.audit_interval = value,
            ("number_of_runs", None) => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                    return Err(ParameterError::InvalidValue {
                        name: name.to_string(),
                        value,
                        reason: "must be a whole number",
                    });
                }
                self.number_of_runs = value as usize;
            }
            (record, Some(rest)) => {
                let params = self.record_mut(record).ok_or_else(|| unknown("Param", name))?;
                params.set_parameter(rest, value)?;
            }
            _ => return Err(unknown("Param", name)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_default() {
        let param = Param::default();
        assert_eq!(param.warm_up_period, 1095.0);
        assert_eq!(param.data_collection_period, 1825.0);
        assert_eq!(param.audit_interval, 1.0);
        assert_eq!(param.number_of_runs, 150);
        assert_eq!(param.run_length(), 2920.0);
        assert!(param.validate().is_ok());
    }

    #[test]
    fn test_scalar_parameters() {
        let mut param = Param::default();
        param.set_parameter("warm_up_period", 10.0).unwrap();
        param.set_parameter("number_of_runs", 5.0).unwrap();
        assert_eq!(param.warm_up_period, 10.0);
        assert_eq!(param.number_of_runs, 5);
        assert!(param.set_parameter("number_of_runs", 2.5).is_err());
    }

    #[test]
    fn test_nested_parameters() {
        let mut param = Param::default();
        param.set_parameter("rehab_los.neuro.sd", 20.0).unwrap();
        assert_eq!(param.rehab_los.get(LosCategory::Neuro).unwrap().sd, 20.0);
        assert_eq!(param.get_parameter("asu_routing.tia.esd"), Some(0.01));
        assert!(param.parameter_names().contains(&"asu_routing.stroke.rehab".to_string()));
    }

    #[test]
    fn test_unknown_names_rejected() {
        let mut param = Param::default();
        for name in ["new_entry", "warm_up_period.mean", "icu_arrivals.stroke", "asu_los.stroke"] {
            let err = param.set_parameter(name, 1.0).unwrap_err();
            assert!(
                err.to_string().contains("only possible to modify existing attributes"),
                "{} gave {}",
                name,
                err
            );
        }
    }

    #[test]
    fn test_rehab_patient_types_include_transfers() {
        let mut param = Param::default();
        param.rehab_arrivals = Arrivals::new(Unit::Rehab, [(PatientType::Stroke, 21.8)]);
        let types = param.patient_types_in(Unit::Rehab);
        assert!(types.contains(&PatientType::Neuro));
        assert!(types.contains(&PatientType::Tia));
    }

    #[test]
    fn test_missing_los_category_detected() {
        let mut param = Param::default();
        param.asu_los = LengthOfStay::new(
            Unit::Asu,
            param.asu_los.iter().filter(|(c, _)| *c != LosCategory::StrokeMortality),
        );
        match param.validate() {
            Err(ParameterError::MissingParameter { record, name }) => {
                assert_eq!(record, "ASULOS");
                assert_eq!(name, "stroke_mortality");
            }
            other => panic!("Expected MissingParameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_on_wrong_unit_detected() {
        let param = Param { asu_arrivals: Arrivals::rehab_default(), ..Default::default() };
        assert!(matches!(param.validate(), Err(ParameterError::UnitMismatch { .. })));
    }

    #[test]
    fn test_invalid_periods() {
        let param = Param { warm_up_period: -1.0, ..Default::default() };
        assert!(param.validate().is_err());
        let param = Param { audit_interval: 0.0, ..Default::default() };
        assert!(param.validate().is_err());
        let param = Param { number_of_runs: 0, ..Default::default() };
        assert!(param.validate().is_err());
    }
}
