//! Stream construction for a model run
//!
//! Seeds are derived from the run number and a stable label naming the stream, so
//! building the streams is pure: the same run number always yields the same
//! sequences, and adding, removing or re-parameterising one stream leaves the seeds
//! of every other stream untouched.

use std::collections::BTreeMap;

use tracing::debug;

use super::{DiscreteEmpirical, DistributionError, Exponential, Lognormal};
use crate::parameters::{Arrivals, LengthOfStay, Routing};
use crate::types::{Destination, LosCategory, PatientType, Unit};

/// Purpose of a sampling stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Inter-arrival times
    Arrival,
    /// Lengths of stay
    LengthOfStay,
    /// Routing decisions
    Routing,
}

impl StreamKind {
    fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Arrival => "arrival",
            StreamKind::LengthOfStay => "los",
            StreamKind::Routing => "routing",
        }
    }
}

/// Builds the seeded streams for one run
#[derive(Debug, Clone, Copy)]
pub struct StreamFactory {
    run_number: u64,
}

impl StreamFactory {
    /// Create a factory for a run
    pub fn new(run_number: u64) -> Self {
        Self { run_number }
    }

    /// Run number the seeds derive from
    pub fn run_number(&self) -> u64 {
        self.run_number
    }

    /// Stable label for a stream, e.g. `arrival/asu/stroke`
    pub fn label(kind: StreamKind, unit: Unit, key: &str) -> String {
        format!("{}/{}/{}", kind.as_str(), unit.as_str(), key)
    }

    /// Seed for the stream with the given label
    pub fn seed_for(&self, label: &str) -> u64 {
        splitmix64(splitmix64(self.run_number) ^ fnv1a(label.as_bytes()))
    }

    /// One exponential inter-arrival stream per patient type in `arrivals`
    pub fn arrival_streams(
        &self,
        arrivals: &Arrivals,
    ) -> Result<BTreeMap<PatientType, Exponential>, DistributionError> {
        arrivals
            .iter()
            .map(|(patient_type, mean)| {
                let label = Self::label(StreamKind::Arrival, arrivals.unit(), patient_type.as_str());
                let seed = self.seed_for(&label);
                debug!(label = %label, seed, mean, "Creating arrival stream");
                Ok::<_, DistributionError>((patient_type, Exponential::new(mean, seed)?))
            })
            .collect()
    }

    /// One lognormal length-of-stay stream per category in `los`
    pub fn los_streams(
        &self,
        los: &LengthOfStay,
    ) -> Result<BTreeMap<LosCategory, Lognormal>, DistributionError> {
        los.iter()
            .map(|(category, spec)| {
                let label = Self::label(StreamKind::LengthOfStay, los.unit(), category.as_str());
                let seed = self.seed_for(&label);
                debug!(label = %label, seed, mean = spec.mean, sd = spec.sd, "Creating length of stay stream");
                Ok::<_, DistributionError>((category, Lognormal::new(spec.mean, spec.sd, seed)?))
            })
            .collect()
    }

    /// One routing stream per patient type in `routing`
    pub fn routing_streams(
        &self,
        routing: &Routing,
    ) -> Result<BTreeMap<PatientType, DiscreteEmpirical<Destination>>, DistributionError> {
        routing
            .patient_types()
            .map(|patient_type| {
                let label = Self::label(StreamKind::Routing, routing.unit(), patient_type.as_str());
                let seed = self.seed_for(&label);
                let (values, probabilities): (Vec<Destination>, Vec<f64>) = routing
                    .destinations(patient_type)
                    .map(|dests| dests.iter().map(|(d, p)| (*d, *p)).unzip())
                    .unwrap_or_default();
                debug!(label = %label, seed, "Creating routing stream");
                Ok::<_, DistributionError>((patient_type, DiscreteEmpirical::new(values, probabilities, seed)?))
            })
            .collect()
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::Sampler;

    #[test]
    fn test_seeds_are_deterministic_and_distinct() {
        let factory = StreamFactory::new(42);
        let a = factory.seed_for("arrival/asu/stroke");
        assert_eq!(a, StreamFactory::new(42).seed_for("arrival/asu/stroke"));
        assert_ne!(a, factory.seed_for("arrival/asu/tia"));
        assert_ne!(a, factory.seed_for("arrival/rehab/stroke"));
        assert_ne!(a, StreamFactory::new(43).seed_for("arrival/asu/stroke"));
    }

    #[test]
    fn test_label_format() {
        assert_eq!(StreamFactory::label(StreamKind::Routing, Unit::Rehab, "neuro"), "routing/rehab/neuro");
    }

    #[test]
    fn test_changing_one_mean_leaves_other_streams_alone() {
        let factory = StreamFactory::new(7);
        let base = Arrivals::asu_default();
        let mut changed = base.clone();
        changed.set(PatientType::Stroke, 1.0).unwrap();

        let mut base_streams = factory.arrival_streams(&base).unwrap();
        let mut changed_streams = factory.arrival_streams(&changed).unwrap();

        let tia_base = base_streams.get_mut(&PatientType::Tia).unwrap().sample_n(10);
        let tia_changed = changed_streams.get_mut(&PatientType::Tia).unwrap().sample_n(10);
        assert_eq!(tia_base, tia_changed);
    }

    #[test]
    fn test_stream_counts_follow_records() {
        let factory = StreamFactory::new(1);
        assert_eq!(factory.los_streams(&LengthOfStay::asu_default()).unwrap().len(), 6);
        assert_eq!(factory.los_streams(&LengthOfStay::rehab_default()).unwrap().len(), 5);
        assert_eq!(factory.routing_streams(&Routing::rehab_default()).unwrap().len(), 4);
    }

    #[test]
    fn test_invalid_parameters_fail() {
        let mut asu = Arrivals::asu_default();
        asu.set(PatientType::Neuro, -2.0).unwrap();
        assert!(StreamFactory::new(1).arrival_streams(&asu).is_err());
    }
}
