// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use stroke_capacity_sim::*;

mod cli_argument_parsing_tests;
mod parameter_tests;

#[test]
fn test_patient_id_format() {
    let id = PatientId(7);
    assert_eq!(id.to_string(), "PAT_000007");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"PAT_000007\"");
}

#[test]
fn test_enum_display() {
    for unit in Unit::ALL {
        assert!(!unit.to_string().is_empty());
        assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
    }
    for patient_type in PatientType::ALL {
        assert!(!patient_type.to_string().is_empty());
    }
    for destination in Destination::ALL {
        assert!(!destination.to_string().is_empty());
    }
}

#[test]
fn test_serialization_roundtrip() {
    let param = Param::default();
    let json = serde_json::to_string(&param).unwrap();
    let deserialized: Param = serde_json::from_str(&json).unwrap();
    assert_eq!(param, deserialized);

    let category = LosCategory::StrokeNoEsd;
    assert_eq!(serde_json::to_string(&category).unwrap(), "\"stroke_noesd\"");
}

#[test]
fn test_end_to_end_experiment() {
    let mut param = Param::default();
    param.set_parameter("warm_up_period", 60.0).unwrap();
    param.set_parameter("data_collection_period", 120.0).unwrap();
    param.set_parameter("number_of_runs", 2.0).unwrap();

    let results = Runner::new(param).run_reps().unwrap();
    let table = get_occupancy_freq(&[], Unit::Asu);
    assert!(table.is_empty());
    assert_eq!(results.asu_occupancy.total(), 240);
    assert!(results.asu_occupancy.to_string().contains("prob_delay"));
}
