//! Patient entity and stay history

use serde::{Deserialize, Serialize};

use super::PatientState;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Destination, LosCategory, PatientId, PatientType, Unit};

/// One bed occupation in one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    /// Unit the bed belongs to
    pub unit: Unit,
    /// Simulated time of admission
    pub admitted_at: f64,
    /// Category the length of stay was sampled from
    pub los_category: LosCategory,
    /// Sampled length of stay
    pub los: f64,
    /// Destination sampled on admission and applied when the stay ends
    pub destination: Destination,
    /// Simulated time the bed was released, once the stay has ended
    pub departed_at: Option<f64>,
}

impl Stay {
    /// Scheduled end of the stay
    pub fn scheduled_end(&self) -> f64 {
        self.admitted_at + self.los
    }
}

/// A patient moving through the stroke pathway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Identifier, sequential within a run
    pub id: PatientId,
    /// Clinical type
    pub patient_type: PatientType,
    /// Unit the patient first arrived at
    pub arrival_unit: Unit,
    /// Simulated arrival time
    pub arrival_time: f64,
    state: PatientState,
    stays: Vec<Stay>,
}

impl Patient {
    /// Create a patient that has not yet been admitted
    pub fn new(id: PatientId, patient_type: PatientType, arrival_unit: Unit, arrival_time: f64) -> Self {
        Self {
            id,
            patient_type,
            arrival_unit,
            arrival_time,
            state: PatientState::AwaitingArrival,
            stays: Vec::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PatientState {
        self.state
    }

    /// Every stay so far, in order
    pub fn stays(&self) -> &[Stay] {
        &self.stays
    }

    /// Stay in progress or most recently ended
    pub fn current_stay(&self) -> Option<&Stay> {
        self.stays.last()
    }

    /// Admit the patient to a bed in `unit`
    ///
    /// Valid on arrival, or after an ASU stay routed to rehabilitation.
    pub fn admit(
        &mut self,
        unit: Unit,
        now: f64,
        los_category: LosCategory,
        los: f64,
        destination: Destination,
    ) -> SimulationResult<&Stay> {
        if self.state == PatientState::AwaitingArrival && unit != self.arrival_unit {
            return Err(SimulationError::state_error(format!(
                "{} arrived at {} but was admitted to {}",
                self.id, self.arrival_unit, unit
            )));
        }
        self.state.transition(PatientState::Admitted(unit))?;
        self.stays.push(Stay { unit, admitted_at: now, los_category, los, destination, departed_at: None });
        self.stays
            .last()
            .ok_or_else(|| SimulationError::state_error(format!("{} has no stay after admission", self.id)))
    }

    /// Release the bed and return the destination sampled on admission
    pub fn end_stay(&mut self, now: f64) -> SimulationResult<Destination> {
        let unit = self.state.occupied_unit().ok_or_else(|| {
            SimulationError::state_error(format!("{} ended a stay while {}", self.id, self.state))
        })?;
        self.state.transition(PatientState::AwaitingRouting(unit))?;
        let stay = self
            .stays
            .last_mut()
            .ok_or_else(|| SimulationError::state_error(format!("{} has no stay to end", self.id)))?;
        stay.departed_at = Some(now);
        Ok(stay.destination)
    }

    /// Leave the modelled units
    pub fn depart(&mut self) -> SimulationResult<()> {
        self.state.transition(PatientState::Departed)
    }

    /// Whether the patient moved from the ASU to rehabilitation
    pub fn was_transferred(&self) -> bool {
        self.stays.iter().any(|s| s.unit == Unit::Asu && s.destination == Destination::Rehab)
            && self.stays.iter().any(|s| s.unit == Unit::Rehab)
    }

    /// Total sampled length of stay across units
    pub fn total_los(&self) -> f64 {
        self.stays.iter().map(|s| s.los).sum()
    }
}
