//! Identifier types for the stroke pathway simulation
//!
//! Patient identifiers are sequential within a run so that two runs with the same
//! run number label their patients identically.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier for a patient within a single model run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(pub u64);

impl PatientId {
    /// Position of the patient in the model's patient store
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PAT_{:06}", self.0)
    }
}

impl Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("PAT_").unwrap_or(&s);
        digits.parse::<u64>().map(PatientId).map_err(serde::de::Error::custom)
    }
}

/// Hands out sequential patient identifiers
#[derive(Debug, Clone, Default)]
pub struct PatientIdGenerator {
    next: u64,
}

impl PatientIdGenerator {
    /// Create a generator starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused identifier
    pub fn next_id(&mut self) -> PatientId {
        let id = PatientId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut generator = PatientIdGenerator::new();
        assert_eq!(generator.next_id(), PatientId(0));
        assert_eq!(generator.next_id(), PatientId(1));
        assert_eq!(generator.next_id().index(), 2);
    }

    #[test]
    fn test_display_and_serde_format() {
        let id = PatientId(42);
        assert_eq!(id.to_string(), "PAT_000042");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"PAT_000042\"");
        let parsed: PatientId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
