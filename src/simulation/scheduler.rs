//! Event list
//!
//! A binary heap of pending events ordered by simulated time. Events scheduled
//! for the same time come out in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

use super::{SimulationError, SimulationResult};

/// An event waiting in the list
#[derive(Debug)]
struct Scheduled<E> {
    at: f64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    // Reversed so the max-heap pops the earliest (time, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.at.total_cmp(&self.at).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded event list with a monotonic clock
#[derive(Debug)]
pub struct Scheduler<E> {
    now: f64,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self { now: 0.0, next_seq: 0, queue: BinaryHeap::new() }
    }
}

impl<E> Scheduler<E> {
    /// Create an empty event list with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of events waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether no events are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time of the next event, if any
    pub fn peek_time(&self) -> Option<f64> {
        self.queue.peek().map(|s| s.at)
    }

    /// Schedule `event` at absolute time `at`
    pub fn schedule(&mut self, at: f64, event: E) -> SimulationResult<()> {
        if at.is_nan() || at < self.now {
            return Err(SimulationError::scheduler_error(format!(
                "cannot schedule an event at {} when the clock is at {}",
                at, self.now
            )));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(at, seq, now = self.now, "Scheduling event");
        self.queue.push(Scheduled { at, seq, event });
        Ok(())
    }

    /// Schedule `event` after `delay` time units
    pub fn schedule_in(&mut self, delay: f64, event: E) -> SimulationResult<()> {
        self.schedule(self.now + delay, event)
    }

    /// Remove the next event if it is due strictly before `until`, moving the
    /// clock to its time
    pub fn pop_before(&mut self, until: f64) -> Option<(f64, E)> {
        if self.peek_time()? >= until {
            return None;
        }
        let item = self.queue.pop()?;
        self.now = item.at;
        Some((item.at, item.event))
    }

    /// Move the clock to `until` without processing anything
    pub fn advance_to(&mut self, until: f64) -> SimulationResult<()> {
        if until.is_nan() || until < self.now {
            return Err(SimulationError::scheduler_error(format!(
                "cannot move the clock back from {} to {}",
                self.now, until
            )));
        }
        self.now = until;
        Ok(())
    }
}
