//! Stroke pathway model
//!
//! [`Model`] wires the parameters, the sampling streams, the patient lifecycle and
//! the occupancy audit together and drives the event list up to the end of the
//! data collection period.
//!
//! Every patient type declared in a unit's arrivals record gets its own arrival
//! process. On admission the patient's destination is sampled first, because for
//! stroke patients it selects the length-of-stay category; the destination is
//! applied when the stay ends. The model never blocks an admission, it only
//! records how many beds are in use.

use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

use super::{AuditRecord, Occupancy, Scheduler, SimulationError, SimulationResult};
use crate::distributions::{DiscreteEmpirical, Exponential, Lognormal, Sampler, StreamFactory};
use crate::parameters::Param;
use crate::patient::Patient;
use crate::types::{Destination, LosCategory, PatientId, PatientIdGenerator, PatientType, Unit};

/// Something that happens at a point in simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// A patient of `patient_type` arrives at `unit`
    Arrival {
        /// Unit arrived at
        unit: Unit,
        /// Type of the arriving patient
        patient_type: PatientType,
    },
    /// A patient's stay ends and their bed is released
    EndOfStay(PatientId),
    /// Occupancy is recorded
    Audit,
}

/// Sampling streams belonging to one unit
#[derive(Debug, Clone)]
pub struct UnitStreams {
    /// Inter-arrival times per patient type
    pub arrivals: BTreeMap<PatientType, Exponential>,
    /// Lengths of stay per category
    pub los: BTreeMap<LosCategory, Lognormal>,
    /// Destinations per patient type
    pub routing: BTreeMap<PatientType, DiscreteEmpirical<Destination>>,
}

impl UnitStreams {
    fn build(factory: &StreamFactory, param: &Param, unit: Unit) -> SimulationResult<Self> {
        Ok(Self {
            arrivals: factory.arrival_streams(param.arrivals(unit))?,
            los: factory.los_streams(param.los(unit))?,
            routing: factory.routing_streams(param.routing(unit))?,
        })
    }
}

/// One replication of the stroke pathway
#[derive(Debug)]
pub struct Model {
    param: Param,
    run_number: u64,
    asu: UnitStreams,
    rehab: UnitStreams,
    scheduler: Scheduler<ModelEvent>,
    occupancy: Occupancy,
    patients: Vec<Patient>,
    ids: PatientIdGenerator,
    audits: Vec<AuditRecord>,
    events_processed: u64,
    has_run: bool,
}

impl Model {
    /// Validate `param` and build every sampling stream for `run_number`
    #[instrument(skip(param), fields(warm_up = param.warm_up_period, data_collection = param.data_collection_period))]
    pub fn new(param: Param, run_number: u64) -> SimulationResult<Self> {
        param.validate()?;

        let factory = StreamFactory::new(run_number);
        let asu = UnitStreams::build(&factory, &param, Unit::Asu)?;
        let rehab = UnitStreams::build(&factory, &param, Unit::Rehab)?;

        debug!(
            asu_arrival_streams = asu.arrivals.len(),
            rehab_arrival_streams = rehab.arrivals.len(),
            "Built sampling streams"
        );

        Ok(Self {
            param,
            run_number,
            asu,
            rehab,
            scheduler: Scheduler::new(),
            occupancy: Occupancy::default(),
            patients: Vec::new(),
            ids: PatientIdGenerator::new(),
            audits: Vec::new(),
            events_processed: 0,
            has_run: false,
        })
    }

    /// Parameters the model was built with
    pub fn param(&self) -> &Param {
        &self.param
    }

    /// Run number the streams were seeded from
    pub fn run_number(&self) -> u64 {
        self.run_number
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Whether [`Model::run`] has been called
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Events processed so far
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Beds in use right now
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    /// Streams of one unit
    pub fn streams(&self, unit: Unit) -> &UnitStreams {
        match unit {
            Unit::Asu => &self.asu,
            Unit::Rehab => &self.rehab,
        }
    }

    fn streams_mut(&mut self, unit: Unit) -> &mut UnitStreams {
        match unit {
            Unit::Asu => &mut self.asu,
            Unit::Rehab => &mut self.rehab,
        }
    }

    /// Arrival streams of one unit
    pub fn arrival_dist(&self, unit: Unit) -> &BTreeMap<PatientType, Exponential> {
        &self.streams(unit).arrivals
    }

    /// Arrival streams of one unit, for drawing samples outside a run
    pub fn arrival_dist_mut(&mut self, unit: Unit) -> &mut BTreeMap<PatientType, Exponential> {
        &mut self.streams_mut(unit).arrivals
    }

    /// Length-of-stay streams of one unit
    pub fn los_dist(&self, unit: Unit) -> &BTreeMap<LosCategory, Lognormal> {
        &self.streams(unit).los
    }

    /// Routing streams of one unit
    pub fn routing_dist(&self, unit: Unit) -> &BTreeMap<PatientType, DiscreteEmpirical<Destination>> {
        &self.streams(unit).routing
    }

    /// Patients who arrived during data collection
    pub fn patients(&self) -> impl Iterator<Item = &Patient> + '_ {
        let warm_up = self.param.warm_up_period;
        self.patients.iter().filter(move |p| p.arrival_time >= warm_up)
    }

    /// Every patient created during the run, warm-up included
    pub fn all_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Occupancy audits from time zero to the end of the run
    pub fn audit_list(&self) -> &[AuditRecord] {
        &self.audits
    }

    /// Run until `warm_up_period + data_collection_period`
    ///
    /// Events due exactly at the end are not processed. May only be called once.
    #[instrument(skip(self), fields(run_number = self.run_number))]
    pub fn run(&mut self) -> SimulationResult<()> {
        if self.has_run {
            return Err(SimulationError::state_error(format!(
                "model for run {} has already been run",
                self.run_number
            )));
        }
        self.has_run = true;

        let horizon = self.param.run_length();
        self.scheduler.schedule(0.0, ModelEvent::Audit)?;
        for unit in Unit::ALL {
            let patient_types: Vec<PatientType> = self.arrival_dist(unit).keys().copied().collect();
            for patient_type in patient_types {
                self.schedule_next_arrival(unit, patient_type)?;
            }
        }

        while let Some((time, event)) = self.scheduler.pop_before(horizon) {
            trace!(time, ?event, "Processing event");
            self.handle(event)?;
            self.events_processed += 1;
        }
        self.scheduler.advance_to(horizon)?;

        crate::sim_event!(
            info,
            "Model run complete",
            now = self.now(),
            events = self.events_processed,
            patients = self.patients.len(),
            audits = self.audits.len(),
        );
        Ok(())
    }

    fn handle(&mut self, event: ModelEvent) -> SimulationResult<()> {
        match event {
            ModelEvent::Arrival { unit, patient_type } => {
                let id = self.ids.next_id();
                let patient = Patient::new(id, patient_type, unit, self.now());
                self.patients.push(patient);
                self.admit(id, unit)?;
                self.schedule_next_arrival(unit, patient_type)
            }
            ModelEvent::EndOfStay(id) => self.end_stay(id),
            ModelEvent::Audit => {
                let record = AuditRecord::new(self.now(), &self.occupancy);
                self.audits.push(record);
                // Audit k is scheduled at exactly k * audit_interval.
                let next = self.audits.len() as f64 * self.param.audit_interval;
                self.scheduler.schedule(next, ModelEvent::Audit)
            }
        }
    }

    fn schedule_next_arrival(&mut self, unit: Unit, patient_type: PatientType) -> SimulationResult<()> {
        let iat = self
            .streams_mut(unit)
            .arrivals
            .get_mut(&patient_type)
            .map(|stream| stream.sample())
            .ok_or_else(|| missing_stream("arrival", unit, patient_type.as_str()))?;
        self.scheduler.schedule_in(iat, ModelEvent::Arrival { unit, patient_type })
    }

    fn admit(&mut self, id: PatientId, unit: Unit) -> SimulationResult<()> {
        let now = self.now();
        let patient_type = self.patient(id)?.patient_type;

        let streams = self.streams_mut(unit);
        let destination = streams
            .routing
            .get_mut(&patient_type)
            .map(|stream| stream.sample())
            .ok_or_else(|| missing_stream("routing", unit, patient_type.as_str()))?;
        let category = LosCategory::for_stay(unit, patient_type, destination);
        let los = streams
            .los
            .get_mut(&category)
            .map(|stream| stream.sample())
            .ok_or_else(|| missing_stream("length of stay", unit, category.as_str()))?;

        self.patient_mut(id)?.admit(unit, now, category, los, destination)?;
        self.occupancy.admit(unit);
        trace!(patient = %id, %unit, %category, los, %destination, "Admitted");
        self.scheduler.schedule(now + los, ModelEvent::EndOfStay(id))
    }

    fn end_stay(&mut self, id: PatientId) -> SimulationResult<()> {
        let now = self.now();
        let patient = self.patient_mut(id)?;
        let unit = patient.state().occupied_unit().ok_or_else(|| {
            SimulationError::state_error(format!("{} has no bed to release", id))
        })?;
        let destination = patient.end_stay(now)?;
        self.occupancy.release(unit)?;

        match destination.next_unit() {
            Some(next_unit) => {
                trace!(patient = %id, from = %unit, to = %next_unit, "Transferred");
                self.admit(id, next_unit)
            }
            None => {
                trace!(patient = %id, %unit, %destination, "Departed");
                self.patient_mut(id)?.depart()
            }
        }
    }

    fn patient(&self, id: PatientId) -> SimulationResult<&Patient> {
        self.patients
            .get(id.index())
            .ok_or_else(|| SimulationError::state_error(format!("unknown patient {}", id)))
    }

    fn patient_mut(&mut self, id: PatientId) -> SimulationResult<&mut Patient> {
        self.patients
            .get_mut(id.index())
            .ok_or_else(|| SimulationError::state_error(format!("unknown patient {}", id)))
    }
}

fn missing_stream(purpose: &str, unit: Unit, key: &str) -> SimulationError {
    SimulationError::configuration_error(format!("no {} stream for {} in {}", purpose, key, unit))
}
