//! Unassignment-reason aggregation across search iterations.
//!
//! The search engine reports, for every iteration, which jobs it failed to
//! place and why. The tracker folds those explanations into a per-job
//! histogram and answers "what was the most likely cause" once the run is
//! over.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::Id;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The search reported a diagnostic code outside the known enumeration.
    #[error("unknown unassignment reason code {0}")]
    UnknownReasonCode(i32),
}

/// Diagnostic classification for a job the search failed to place.
///
/// Variants are declared in descending priority: when two reasons occur
/// equally often for a job, the earlier variant wins the query. Engine codes
/// start at 1; 0 and negatives are never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnassignedReason {
    /// No vehicle had spare capacity for the job.
    CapacityViolation,
    /// The job's time window could not be met on any route.
    TimeWindowViolation,
    /// Insertion would push a route past its maximum duration.
    MaxRouteDurationViolation,
    /// No feasible insertion point existed for any other cause.
    NoFeasibleInsertion,
}

impl UnassignedReason {
    /// All reasons in descending priority order.
    pub const ALL: [UnassignedReason; 4] = [
        UnassignedReason::CapacityViolation,
        UnassignedReason::TimeWindowViolation,
        UnassignedReason::MaxRouteDurationViolation,
        UnassignedReason::NoFeasibleInsertion,
    ];

    /// Decodes a numeric diagnostic code reported by the search engine.
    pub fn from_code(code: i32) -> Result<Self, TrackerError> {
        match code {
            1 => Ok(UnassignedReason::CapacityViolation),
            2 => Ok(UnassignedReason::TimeWindowViolation),
            3 => Ok(UnassignedReason::MaxRouteDurationViolation),
            4 => Ok(UnassignedReason::NoFeasibleInsertion),
            _ => Err(TrackerError::UnknownReasonCode(code)),
        }
    }

    /// The numeric code the search engine uses for this reason.
    pub fn code(self) -> i32 {
        match self {
            UnassignedReason::CapacityViolation => 1,
            UnassignedReason::TimeWindowViolation => 2,
            UnassignedReason::MaxRouteDurationViolation => 3,
            UnassignedReason::NoFeasibleInsertion => 4,
        }
    }
}

/// Per-iteration unassignment explanation emitted by the search engine.
///
/// Transient: decoded and folded into the tracker's histogram on receipt,
/// not retained individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignmentEvent<J> {
    pub job_id: J,
    pub iteration: usize,
    pub code: i32,
}

/// Accumulates unassignment reasons per job across a whole search run.
///
/// Counts only grow: a job that gets assigned in a later iteration simply
/// stops generating events, its past counts stay. The histogram answers how
/// often a job was unassigned for a reason over the run, not why it is
/// unassigned right now.
#[derive(Debug)]
pub struct UnassignmentReasonTracker<J: Id> {
    histogram: Mutex<HashMap<J, HashMap<UnassignedReason, u64>>>,
}

impl<J: Id> Default for UnassignmentReasonTracker<J> {
    fn default() -> Self {
        Self {
            histogram: Mutex::new(HashMap::new()),
        }
    }
}

impl<J: Id> UnassignmentReasonTracker<J> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one unassignment observation for `job_id`.
    pub fn on_unassignment(&self, job_id: J, iteration: usize, reason: UnassignedReason) {
        tracing::trace!(iteration, ?reason, "job unassigned");

        let mut histogram = self.histogram.lock().unwrap_or_else(PoisonError::into_inner);
        *histogram
            .entry(job_id)
            .or_default()
            .entry(reason)
            .or_insert(0) += 1;
    }

    /// Decodes and records an explanation carrying a raw engine code.
    ///
    /// An unknown code fails without touching the histogram, so its
    /// completeness guarantee survives.
    pub fn observe(&self, event: UnassignmentEvent<J>) -> Result<(), TrackerError> {
        let reason = UnassignedReason::from_code(event.code)?;
        self.on_unassignment(event.job_id, event.iteration, reason);
        Ok(())
    }

    /// Most frequent unassignment reason for `job_id` across the run.
    ///
    /// Count ties resolve to the higher-priority variant, so repeated
    /// queries give the same answer regardless of observation order.
    /// `None` means the job was never reported unassigned, distinct from a
    /// zero count.
    pub fn most_likely_reason(&self, job_id: &J) -> Option<UnassignedReason> {
        let histogram = self.histogram.lock().unwrap_or_else(PoisonError::into_inner);
        let counts = histogram.get(job_id)?;

        let mut best: Option<(UnassignedReason, u64)> = None;
        for reason in UnassignedReason::ALL {
            if let Some(&count) = counts.get(&reason) {
                match best {
                    Some((_, best_count)) if count <= best_count => {}
                    _ => best = Some((reason, count)),
                }
            }
        }
        best.map(|(reason, _)| reason)
    }

    /// Total observations recorded for `job_id`.
    pub fn observation_count(&self, job_id: &J) -> u64 {
        self.histogram
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(job_id)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// All jobs that were reported unassigned at least once.
    pub fn job_ids(&self) -> Vec<J> {
        self.histogram
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
