//! Replication runner
//!
//! Runs independent replications of the [`Model`] with run numbers
//! `0..number_of_runs`, keeps the data collection part of each audit trail and
//! pools them into one occupancy frequency table per unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::{data_collection_audits, AuditRecord, Model, SimulationResult};
use crate::analysis::{self, OccupancyFrequency};
use crate::parameters::Param;
use crate::patient::Patient;
use crate::types::{PatientType, Unit};

/// Headline figures for one replication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run number the replication was seeded from
    pub run_number: u64,
    /// Patients arriving during data collection, by type
    pub patients_by_type: BTreeMap<PatientType, usize>,
    /// Patients arriving during data collection who moved from the ASU to rehab
    pub transfers_to_rehab: usize,
    /// Mean audited occupancy per unit during data collection
    pub mean_occupancy: BTreeMap<Unit, f64>,
    /// Highest audited occupancy per unit during data collection
    pub max_occupancy: BTreeMap<Unit, usize>,
}

impl RunSummary {
    fn new(run_number: u64, patients: &[Patient], audits: &[AuditRecord]) -> Self {
        let mut patients_by_type = BTreeMap::new();
        for patient in patients {
            *patients_by_type.entry(patient.patient_type).or_insert(0) += 1;
        }

        let mut mean_occupancy = BTreeMap::new();
        let mut max_occupancy = BTreeMap::new();
        for unit in Unit::ALL {
            let levels = audits.iter().map(|a| a.occupancy(unit));
            let mean = if audits.is_empty() {
                0.0
            } else {
                levels.clone().sum::<usize>() as f64 / audits.len() as f64
            };
            mean_occupancy.insert(unit, mean);
            max_occupancy.insert(unit, levels.max().unwrap_or(0));
        }

        Self {
            run_number,
            patients_by_type,
            transfers_to_rehab: patients.iter().filter(|p| p.was_transferred()).count(),
            mean_occupancy,
            max_occupancy,
        }
    }

    /// Total patients arriving during data collection
    pub fn total_patients(&self) -> usize {
        self.patients_by_type.values().sum()
    }
}

/// Output of one replication
#[derive(Debug, Clone)]
pub struct RunResults {
    /// Audits taken during data collection
    pub audits: Vec<AuditRecord>,
    /// Patients arriving during data collection
    pub patients: Vec<Patient>,
    /// Headline figures
    pub summary: RunSummary,
}

/// Output of a full experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResults {
    /// When the experiment finished
    pub generated_at: DateTime<Utc>,
    /// Parameters every replication used
    pub param: Param,
    /// One summary per replication, in run number order
    pub runs: Vec<RunSummary>,
    /// ASU occupancy pooled across replications
    pub asu_occupancy: OccupancyFrequency,
    /// Rehabilitation occupancy pooled across replications
    pub rehab_occupancy: OccupancyFrequency,
}

impl ExperimentResults {
    /// Pooled table for a unit
    pub fn occupancy(&self, unit: Unit) -> &OccupancyFrequency {
        match unit {
            Unit::Asu => &self.asu_occupancy,
            Unit::Rehab => &self.rehab_occupancy,
        }
    }

    /// Write the results as pretty-printed JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Runs replications of the model for one set of parameters
#[derive(Debug, Clone)]
pub struct Runner {
    param: Param,
}

impl Runner {
    /// Create a runner for `param`
    pub fn new(param: Param) -> Self {
        Self { param }
    }

    /// Parameters used by every replication
    pub fn param(&self) -> &Param {
        &self.param
    }

    /// Run one replication
    pub fn run_single(&self, run_number: u64) -> SimulationResult<RunResults> {
        let span = crate::perf_span!("replication", run_number = run_number);
        let _enter = span.enter();
        let started = Instant::now();

        let mut model = Model::new(self.param.clone(), run_number)?;
        model.run()?;

        let audits = data_collection_audits(model.audit_list(), self.param.warm_up_period);
        let patients: Vec<Patient> = model.patients().cloned().collect();
        let summary = RunSummary::new(run_number, &patients, &audits);

        debug!(
            run_number,
            patients = patients.len(),
            audits = audits.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Replication finished"
        );
        Ok(RunResults { audits, patients, summary })
    }

    /// Run every replication and pool the occupancy audits
    #[instrument(skip(self), fields(number_of_runs = self.param.number_of_runs))]
    pub fn run_reps(&self) -> SimulationResult<ExperimentResults> {
        self.param.validate()?;
        info!("Running {} replications", self.param.number_of_runs);
        let started = Instant::now();

        let mut pooled = Vec::new();
        let mut runs = Vec::with_capacity(self.param.number_of_runs);
        for run_number in 0..self.param.number_of_runs as u64 {
            let results = self.run_single(run_number)?;
            pooled.extend(results.audits);
            runs.push(results.summary);
        }

        let results = ExperimentResults {
            generated_at: Utc::now(),
            param: self.param.clone(),
            runs,
            asu_occupancy: Self::get_occupancy_freq(&pooled, Unit::Asu),
            rehab_occupancy: Self::get_occupancy_freq(&pooled, Unit::Rehab),
        };

        crate::sim_event!(
            info,
            "Replications complete",
            runs = results.runs.len(),
            audits = pooled.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
        );
        Ok(results)
    }

    /// Occupancy frequency table for one unit of an audit trail
    pub fn get_occupancy_freq(audits: &[AuditRecord], unit: Unit) -> OccupancyFrequency {
        analysis::get_occupancy_freq(audits, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_param(runs: usize) -> Param {
        Param {
            warm_up_period: 20.0,
            data_collection_period: 40.0,
            number_of_runs: runs,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_single_keeps_data_collection_only() {
        let results = Runner::new(quick_param(1)).run_single(0).unwrap();
        assert_eq!(results.audits.len(), 40);
        assert!(results.audits.iter().all(|a| a.time >= 20.0));
        assert!(results.patients.iter().all(|p| p.arrival_time >= 20.0));
        assert_eq!(results.summary.total_patients(), results.patients.len());
    }

    #[test]
    fn test_summary_statistics() {
        let audits = vec![
            AuditRecord { time: 0.0, asu_occupancy: 2, rehab_occupancy: 5 },
            AuditRecord { time: 1.0, asu_occupancy: 4, rehab_occupancy: 3 },
        ];
        let summary = RunSummary::new(7, &[], &audits);
        assert_eq!(summary.run_number, 7);
        assert_eq!(summary.mean_occupancy[&Unit::Asu], 3.0);
        assert_eq!(summary.max_occupancy[&Unit::Rehab], 5);
        assert_eq!(summary.total_patients(), 0);
    }

    #[test]
    fn test_run_reps_pools_all_runs() {
        let results = Runner::new(quick_param(3)).run_reps().unwrap();
        assert_eq!(results.runs.len(), 3);
        assert_eq!(results.runs.iter().map(|r| r.run_number).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(results.asu_occupancy.total(), 120);
        assert_eq!(results.rehab_occupancy.total(), 120);
    }
}
