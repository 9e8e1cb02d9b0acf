//! Bed occupancy counters and the periodic audit

use serde::{Deserialize, Serialize};

use super::{SimulationError, SimulationResult};
use crate::types::Unit;

/// Beds currently occupied in each unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    asu: usize,
    rehab: usize,
}

impl Occupancy {
    /// Beds occupied in `unit`
    pub fn get(&self, unit: Unit) -> usize {
        match unit {
            Unit::Asu => self.asu,
            Unit::Rehab => self.rehab,
        }
    }

    /// A patient took a bed in `unit`
    pub fn admit(&mut self, unit: Unit) {
        *self.slot(unit) += 1;
    }

    /// A patient released a bed in `unit`
    pub fn release(&mut self, unit: Unit) -> SimulationResult<()> {
        let slot = self.slot(unit);
        *slot = slot.checked_sub(1).ok_or_else(|| {
            SimulationError::state_error(format!("released a bed in {} with none occupied", unit))
        })?;
        Ok(())
    }

    fn slot(&mut self, unit: Unit) -> &mut usize {
        match unit {
            Unit::Asu => &mut self.asu,
            Unit::Rehab => &mut self.rehab,
        }
    }
}

/// Occupancy observed at one audit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Simulated time of the audit
    pub time: f64,
    /// Occupied ASU beds
    pub asu_occupancy: usize,
    /// Occupied rehabilitation beds
    pub rehab_occupancy: usize,
}

impl AuditRecord {
    /// Snapshot `occupancy` at `time`
    pub fn new(time: f64, occupancy: &Occupancy) -> Self {
        Self {
            time,
            asu_occupancy: occupancy.get(Unit::Asu),
            rehab_occupancy: occupancy.get(Unit::Rehab),
        }
    }

    /// Occupancy of one unit
    pub fn occupancy(&self, unit: Unit) -> usize {
        match unit {
            Unit::Asu => self.asu_occupancy,
            Unit::Rehab => self.rehab_occupancy,
        }
    }
}

/// Audits taken at or after `warm_up_period`
pub fn data_collection_audits(audits: &[AuditRecord], warm_up_period: f64) -> Vec<AuditRecord> {
    audits.iter().filter(|a| a.time >= warm_up_period).copied().collect()
}
