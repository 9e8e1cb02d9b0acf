//! Occupancy frequency analysis
//!
//! Turns an occupancy audit trail into the table used for bed planning: how often
//! each number of occupied beds was observed and the probability that a patient
//! arriving to a unit with that many beds would be delayed.
//!
//! # Usage Example
//!
//! ```rust
//! use stroke_capacity_sim::analysis::get_occupancy_freq;
//! use stroke_capacity_sim::simulation::AuditRecord;
//! use stroke_capacity_sim::types::Unit;
//!
//! let audits: Vec<AuditRecord> = [1, 1, 2, 3]
//!     .iter()
//!     .enumerate()
//!     .map(|(t, beds)| AuditRecord { time: t as f64, asu_occupancy: *beds, rehab_occupancy: 0 })
//!     .collect();
//!
//! let table = get_occupancy_freq(&audits, Unit::Asu);
//! assert_eq!(table.beds(), vec![1, 2, 3]);
//! assert_eq!(table.rows[0].freq, 2);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::simulation::{AuditRecord, SimulationError, SimulationResult};
use crate::types::Unit;

/// One occupancy level of the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRow {
    /// Number of occupied beds
    pub beds: usize,
    /// Audits observing exactly this many beds
    pub freq: usize,
    /// Share of audits observing this many beds
    pub pct: f64,
    /// Share of audits observing this many beds or fewer
    pub c_pct: f64,
    /// Probability of delay with this many beds, `pct / c_pct`
    pub prob_delay: f64,
}

/// Occupancy frequency table for one unit, ordered by beds ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyFrequency {
    /// Unit the audits were taken from
    pub unit: Unit,
    /// One row per observed occupancy level
    pub rows: Vec<OccupancyRow>,
}

impl OccupancyFrequency {
    /// Observed occupancy levels
    pub fn beds(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.beds).collect()
    }

    /// Whether no audits were analysed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of audits analysed
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.freq).sum()
    }

    /// Row for a given number of beds
    pub fn row(&self, beds: usize) -> Option<&OccupancyRow> {
        self.rows.iter().find(|r| r.beds == beds)
    }

    /// Smallest number of beds whose probability of delay is at most `threshold`
    ///
    /// Only levels at or above the most common occupancy are considered, since
    /// below it the probability of delay is not meaningful for planning.
    pub fn beds_for_delay(&self, threshold: f64) -> Option<usize> {
        let mode = self.rows.iter().max_by_key(|r| r.freq)?.beds;
        self.rows
            .iter()
            .filter(|r| r.beds >= mode)
            .find(|r| r.prob_delay <= threshold)
            .map(|r| r.beds)
    }
}

impl fmt::Display for OccupancyFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} occupancy:", self.unit)?;
        writeln!(f, "{:>6} {:>8} {:>8} {:>8} {:>10}", "beds", "freq", "pct", "c_pct", "prob_delay")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>6} {:>8} {:>8.4} {:>8.4} {:>10.4}",
                row.beds, row.freq, row.pct, row.c_pct, row.prob_delay
            )?;
        }
        Ok(())
    }
}

/// Frequency of each occupancy level of `unit` across `audits`
pub fn get_occupancy_freq(audits: &[AuditRecord], unit: Unit) -> OccupancyFrequency {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for audit in audits {
        *counts.entry(audit.occupancy(unit)).or_default() += 1;
    }

    let total = audits.len() as f64;
    let mut c_pct = 0.0;
    let rows = counts
        .into_iter()
        .map(|(beds, freq)| {
            let pct = freq as f64 / total;
            c_pct += pct;
            let prob_delay = if c_pct == 0.0 { 0.0 } else { pct / c_pct };
            OccupancyRow { beds, freq, pct, c_pct, prob_delay }
        })
        .collect();

    OccupancyFrequency { unit, rows }
}

/// [`get_occupancy_freq`] with the unit given by name (`asu` or `rehab`)
pub fn get_occupancy_freq_by_name(
    audits: &[AuditRecord],
    unit: &str,
) -> SimulationResult<OccupancyFrequency> {
    let unit = unit.parse::<Unit>().map_err(SimulationError::analysis_error)?;
    Ok(get_occupancy_freq(audits, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audits(levels: &[(usize, usize)]) -> Vec<AuditRecord> {
        levels
            .iter()
            .flat_map(|(count, beds)| std::iter::repeat(*beds).take(*count))
            .enumerate()
            .map(|(t, beds)| AuditRecord { time: t as f64, asu_occupancy: beds, rehab_occupancy: beds + 1 })
            .collect()
    }

    #[test]
    fn test_rows_sorted_by_beds() {
        let table = get_occupancy_freq(&audits(&[(2, 5), (1, 2), (3, 4)]), Unit::Asu);
        assert_eq!(table.beds(), vec![2, 4, 5]);
        assert_eq!(table.total(), 6);
        assert!((table.rows.last().unwrap().c_pct - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_selection() {
        let trail = audits(&[(4, 1), (3, 2)]);
        assert_eq!(get_occupancy_freq(&trail, Unit::Rehab).beds(), vec![2, 3]);
        assert_eq!(get_occupancy_freq_by_name(&trail, "rehab").unwrap().beds(), vec![2, 3]);
        let err = get_occupancy_freq_by_name(&trail, "icu").unwrap_err();
        assert_eq!(err.category(), "Analysis");
    }

    #[test]
    fn test_empty_trail() {
        let table = get_occupancy_freq(&[], Unit::Asu);
        assert!(table.is_empty());
        assert_eq!(table.beds_for_delay(0.1), None);
    }

    #[test]
    fn test_beds_for_delay() {
        let table = get_occupancy_freq(&audits(&[(4, 1), (3, 2), (2, 3), (1, 4)]), Unit::Asu);
        assert_eq!(table.beds_for_delay(0.25), Some(3));
        assert_eq!(table.beds_for_delay(0.05), None);
    }

    #[test]
    fn test_display_has_header_and_rows() {
        let table = get_occupancy_freq(&audits(&[(1, 7)]), Unit::Asu);
        let text = table.to_string();
        assert!(text.starts_with("ASU occupancy:"));
        assert!(text.contains("prob_delay"));
        assert_eq!(text.lines().count(), 3);
    }
}
