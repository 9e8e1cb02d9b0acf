//! Tests for the name-guarded parameter records
//!
//! Every record accepts changes to the names it was built with and rejects any
//! other name.

use stroke_capacity_sim::parameters::*;
use stroke_capacity_sim::types::{Destination, LosCategory, PatientType, Unit};

fn records() -> Vec<Box<dyn NamedParameters>> {
    vec![
        Box::new(Arrivals::asu_default()),
        Box::new(Arrivals::rehab_default()),
        Box::new(LengthOfStay::asu_default()),
        Box::new(LengthOfStay::rehab_default()),
        Box::new(Routing::asu_default()),
        Box::new(Routing::rehab_default()),
        Box::new(Param::default()),
    ]
}

/// Setting an attribute that does not exist fails on every record
#[test]
fn test_new_attribute_rejected_on_every_record() {
    for mut record in records() {
        let err = record.set_parameter("new_entry", 3.0).unwrap_err();
        assert!(
            err.to_string().contains("only possible to modify existing attributes"),
            "{} gave {}",
            record.record_name(),
            err
        );
        assert!(!record.has_parameter("new_entry"));
    }
}

/// Every listed name can be read back and written
#[test]
fn test_existing_attributes_can_be_changed() {
    for mut record in records() {
        let names = record.parameter_names();
        assert!(!names.is_empty(), "{} has no parameters", record.record_name());
        for name in names {
            let value = record.get_parameter(&name).unwrap();
            record.set_parameter(&name, value).unwrap();
            assert_eq!(record.get_parameter(&name), Some(value));
        }
    }
}

#[test]
fn test_default_values() {
    let param = Param::default();
    assert_eq!(param.asu_arrivals.mean_iat(PatientType::Stroke), Some(3.0));
    assert_eq!(param.rehab_arrivals.mean_iat(PatientType::Tia), Some(41.7));
    assert_eq!(param.asu_los.get(LosCategory::StrokeMortality), Some(LosSpec::new(7.0, 8.7)));
    assert_eq!(param.rehab_los.get(LosCategory::StrokeMortality), None);
    assert_eq!(param.asu_routing.probability(PatientType::Neuro, Destination::Rehab), Some(0.11));
    assert_eq!(param.rehab_routing.probability(PatientType::Other, Destination::Esd), Some(0.13));
}

#[test]
fn test_change_is_observable_through_typed_access() {
    let mut param = Param::default();
    param.set_parameter("asu_los.stroke_esd.mean", 6.0).unwrap();
    param.set_parameter("rehab_routing.stroke.esd", 0.5).unwrap();
    param.set_parameter("rehab_routing.stroke.other", 0.5).unwrap();

    assert_eq!(param.asu_los.get(LosCategory::StrokeEsd).unwrap().mean, 6.0);
    assert_eq!(param.rehab_routing.probability(PatientType::Stroke, Destination::Other), Some(0.5));
    assert!(param.validate().is_ok());
}

#[test]
fn test_record_built_with_subset_of_types() {
    let rehab = Arrivals::new(
        Unit::Rehab,
        [(PatientType::Stroke, 8.0), (PatientType::Tia, 12.0), (PatientType::Other, 20.0)],
    );
    assert_eq!(rehab.len(), 3);
    assert!(!rehab.has_parameter("neuro"));

    let mut rehab = rehab;
    assert!(rehab.set_parameter("neuro", 5.0).is_err());
    assert!(rehab.set_parameter("tia", 5.0).is_ok());
}

#[test]
fn test_routing_must_sum_to_one() {
    let mut param = Param::default();
    param.set_parameter("asu_routing.tia.other", 0.5).unwrap();
    assert!(matches!(param.validate(), Err(ParameterError::RoutingSum { .. })));
}
