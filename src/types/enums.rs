//! Enumeration types for the stroke pathway simulation
//!
//! This module contains the care units, patient types, routing destinations and
//! length-of-stay categories used throughout the simulation system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Care units modelled on the pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Acute Stroke Unit, the first stage of the pathway
    Asu,
    /// Rehabilitation unit, the terminal stage of the pathway
    Rehab,
}

impl Unit {
    /// All units in pathway order
    pub const ALL: [Unit; 2] = [Unit::Asu, Unit::Rehab];

    /// Lowercase label used in stream labels and parameter paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Asu => "asu",
            Unit::Rehab => "rehab",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Asu => write!(f, "ASU"),
            Unit::Rehab => write!(f, "Rehab"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asu" | "acute" | "acute stroke unit" => Ok(Unit::Asu),
            "rehab" | "rehabilitation" => Ok(Unit::Rehab),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Clinical patient types arriving on the pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientType {
    /// Stroke patients
    Stroke,
    /// Transient ischaemic attack
    Tia,
    /// Complex neurological patients
    Neuro,
    /// Any other admission
    Other,
}

impl PatientType {
    /// All patient types
    pub const ALL: [PatientType; 4] =
        [PatientType::Stroke, PatientType::Tia, PatientType::Neuro, PatientType::Other];

    /// Lowercase label used in stream labels and parameter paths
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientType::Stroke => "stroke",
            PatientType::Tia => "tia",
            PatientType::Neuro => "neuro",
            PatientType::Other => "other",
        }
    }
}

impl fmt::Display for PatientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientType::Stroke => write!(f, "Stroke"),
            PatientType::Tia => write!(f, "TIA"),
            PatientType::Neuro => write!(f, "Complex Neurological"),
            PatientType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for PatientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stroke" => Ok(PatientType::Stroke),
            "tia" => Ok(PatientType::Tia),
            "neuro" | "complex neurological" => Ok(PatientType::Neuro),
            "other" => Ok(PatientType::Other),
            _ => Err(format!("Unknown patient type: {}", s)),
        }
    }
}

/// Where a patient goes once a stay ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Transfer to the rehabilitation unit
    Rehab,
    /// Early supported discharge
    Esd,
    /// Any other destination outside the modelled units
    Other,
}

impl Destination {
    /// All destinations
    pub const ALL: [Destination; 3] = [Destination::Rehab, Destination::Esd, Destination::Other];

    /// Lowercase label used in parameter paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Rehab => "rehab",
            Destination::Esd => "esd",
            Destination::Other => "other",
        }
    }

    /// Unit the patient is admitted to next, if the destination is modelled
    pub fn next_unit(&self) -> Option<Unit> {
        match self {
            Destination::Rehab => Some(Unit::Rehab),
            Destination::Esd | Destination::Other => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Rehab => write!(f, "Rehab"),
            Destination::Esd => write!(f, "ESD"),
            Destination::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rehab" => Ok(Destination::Rehab),
            "esd" => Ok(Destination::Esd),
            "other" => Ok(Destination::Other),
            _ => Err(format!("Unknown destination: {}", s)),
        }
    }
}

/// Length-of-stay categories
///
/// Stroke patients are split by where they go next, since early supported
/// discharge and mortality change how long they stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LosCategory {
    /// Stroke patient not discharged to ESD
    #[serde(rename = "stroke_noesd")]
    StrokeNoEsd,
    /// Stroke patient discharged to ESD
    #[serde(rename = "stroke_esd")]
    StrokeEsd,
    /// Stroke patient leaving the ASU for any other destination (including death)
    #[serde(rename = "stroke_mortality")]
    StrokeMortality,
    /// Transient ischaemic attack
    #[serde(rename = "tia")]
    Tia,
    /// Complex neurological
    #[serde(rename = "neuro")]
    Neuro,
    /// Other
    #[serde(rename = "other")]
    Other,
}

impl LosCategory {
    /// Lowercase label used in stream labels and parameter paths
    pub fn as_str(&self) -> &'static str {
        match self {
            LosCategory::StrokeNoEsd => "stroke_noesd",
            LosCategory::StrokeEsd => "stroke_esd",
            LosCategory::StrokeMortality => "stroke_mortality",
            LosCategory::Tia => "tia",
            LosCategory::Neuro => "neuro",
            LosCategory::Other => "other",
        }
    }

    /// Category used for a patient of `patient_type` staying in `unit` and
    /// leaving for `destination`
    pub fn for_stay(unit: Unit, patient_type: PatientType, destination: Destination) -> Self {
        match patient_type {
            PatientType::Stroke => match (unit, destination) {
                (_, Destination::Esd) => LosCategory::StrokeEsd,
                (Unit::Asu, Destination::Rehab) => LosCategory::StrokeNoEsd,
                (Unit::Asu, Destination::Other) => LosCategory::StrokeMortality,
                (Unit::Rehab, _) => LosCategory::StrokeNoEsd,
            },
            PatientType::Tia => LosCategory::Tia,
            PatientType::Neuro => LosCategory::Neuro,
            PatientType::Other => LosCategory::Other,
        }
    }
}

impl fmt::Display for LosCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LosCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stroke_noesd" => Ok(LosCategory::StrokeNoEsd),
            "stroke_esd" => Ok(LosCategory::StrokeEsd),
            "stroke_mortality" => Ok(LosCategory::StrokeMortality),
            "tia" => Ok(LosCategory::Tia),
            "neuro" => Ok(LosCategory::Neuro),
            "other" => Ok(LosCategory::Other),
            _ => Err(format!("Unknown length of stay category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!("asu".parse::<Unit>().unwrap(), Unit::Asu);
        assert_eq!("ASU".parse::<Unit>().unwrap(), Unit::Asu);
        assert_eq!("rehab".parse::<Unit>().unwrap(), Unit::Rehab);
        assert!("icu".parse::<Unit>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for patient_type in PatientType::ALL {
            assert_eq!(patient_type.as_str().parse::<PatientType>().unwrap(), patient_type);
        }
        for destination in Destination::ALL {
            assert_eq!(destination.as_str().parse::<Destination>().unwrap(), destination);
        }
    }

    #[test]
    fn test_stroke_los_category_depends_on_destination() {
        use Destination::*;
        let stroke = PatientType::Stroke;

        assert_eq!(LosCategory::for_stay(Unit::Asu, stroke, Esd), LosCategory::StrokeEsd);
        assert_eq!(LosCategory::for_stay(Unit::Asu, stroke, Rehab), LosCategory::StrokeNoEsd);
        assert_eq!(LosCategory::for_stay(Unit::Asu, stroke, Other), LosCategory::StrokeMortality);
        assert_eq!(LosCategory::for_stay(Unit::Rehab, stroke, Esd), LosCategory::StrokeEsd);
        assert_eq!(LosCategory::for_stay(Unit::Rehab, stroke, Other), LosCategory::StrokeNoEsd);
    }

    #[test]
    fn test_non_stroke_los_category_ignores_destination() {
        for destination in Destination::ALL {
            assert_eq!(
                LosCategory::for_stay(Unit::Asu, PatientType::Neuro, destination),
                LosCategory::Neuro
            );
        }
    }

    #[test]
    fn test_destination_next_unit() {
        assert_eq!(Destination::Rehab.next_unit(), Some(Unit::Rehab));
        assert_eq!(Destination::Esd.next_unit(), None);
        assert_eq!(Destination::Other.next_unit(), None);
    }
}
