//! Patient lifecycle states
//!
//! A patient moves through `AwaitingArrival -> Admitted(unit) -> AwaitingRouting(unit)`
//! and from there is either admitted to the next unit or leaves the modelled system.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::Unit;

/// Where a patient is in the pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "unit", rename_all = "snake_case")]
pub enum PatientState {
    /// Created but not yet in a bed
    AwaitingArrival,
    /// Occupying a bed in a unit
    Admitted(Unit),
    /// Stay in a unit has ended and the destination is being applied
    AwaitingRouting(Unit),
    /// Left the modelled units
    Departed,
}

impl PatientState {
    /// Whether moving from this state to `next` is a legal lifecycle step
    pub fn can_transition_to(&self, next: PatientState) -> bool {
        use PatientState::*;
        match (*self, next) {
            (AwaitingArrival, Admitted(_)) => true,
            (Admitted(current), AwaitingRouting(routed)) => current == routed,
            (AwaitingRouting(from), Admitted(to)) => Self::is_transfer(from, to),
            (AwaitingRouting(_), Departed) => true,
            _ => false,
        }
    }

    /// Move to `next`, failing on an illegal step
    pub fn transition(&mut self, next: PatientState) -> SimulationResult<()> {
        if !self.can_transition_to(next) {
            return Err(SimulationError::state_error(format!(
                "illegal patient transition from {} to {}",
                self, next
            )));
        }
        *self = next;
        Ok(())
    }

    /// Unit whose bed the patient currently holds
    pub fn occupied_unit(&self) -> Option<Unit> {
        match self {
            PatientState::Admitted(unit) => Some(*unit),
            _ => None,
        }
    }

    /// Whether the patient has left the modelled units
    pub fn is_departed(&self) -> bool {
        matches!(self, PatientState::Departed)
    }

    // Rehab is terminal; only the ASU feeds another unit.
    fn is_transfer(from: Unit, to: Unit) -> bool {
        from == Unit::Asu && to == Unit::Rehab
    }
}

impl fmt::Display for PatientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientState::AwaitingArrival => write!(f, "AwaitingArrival"),
            PatientState::Admitted(unit) => write!(f, "Admitted({})", unit),
            PatientState::AwaitingRouting(unit) => write!(f, "AwaitingRouting({})", unit),
            PatientState::Departed => write!(f, "Departed"),
        }
    }
}
