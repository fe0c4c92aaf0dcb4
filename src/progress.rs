//! Search-progress recording at iteration boundaries.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::CandidateSolution;

#[derive(Debug, Error)]
pub enum ProgressError {
    /// The search reported an iteration without any candidate solutions.
    #[error("iteration {0} reported no candidate solutions")]
    EmptySolutionSet(usize),
}

/// Lifecycle point at which the search reports its candidates.
///
/// The recorder applies the same selection rule at every phase; the phase
/// only labels the observation in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    IterationStart,
    IterationEnd,
}

/// Best-solution snapshot for a single search iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub best_cost: f64,
    pub fleet_size: usize,
}

/// Records the best candidate of each iteration of a single search run.
///
/// One instance is created per run and handed to the iteration callbacks;
/// the history stays queryable after the search stops, whether it ran to
/// completion or was cancelled. Reporting the same iteration index again
/// replaces the earlier record.
#[derive(Debug, Default)]
pub struct IterationProgressRecorder {
    history: Mutex<BTreeMap<usize, IterationRecord>>,
}

impl IterationProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the cheapest candidate of `iteration`.
    ///
    /// Cost ties keep the first candidate in the order supplied by the
    /// search, so the recorded fleet size is reproducible across runs.
    pub fn on_iteration<S>(
        &self,
        phase: SearchPhase,
        iteration: usize,
        candidates: &[S],
    ) -> Result<(), ProgressError>
    where
        S: CandidateSolution,
    {
        let mut best: Option<&S> = None;
        for candidate in candidates {
            match best {
                Some(current) if candidate.cost() >= current.cost() => {}
                _ => best = Some(candidate),
            }
        }
        let best = best.ok_or(ProgressError::EmptySolutionSet(iteration))?;

        let record = IterationRecord {
            iteration,
            best_cost: best.cost(),
            fleet_size: best.route_count(),
        };
        tracing::debug!(
            ?phase,
            iteration,
            best_cost = record.best_cost,
            fleet_size = record.fleet_size,
            "iteration observed"
        );

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(iteration, record);

        Ok(())
    }

    /// History ordered by iteration index.
    pub fn history(&self) -> Vec<IterationRecord> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Record with the lowest best cost observed so far.
    ///
    /// Cost ties keep the earliest iteration.
    pub fn best(&self) -> Option<IterationRecord> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let mut best: Option<&IterationRecord> = None;
        for record in history.values() {
            match best {
                Some(current) if record.best_cost >= current.best_cost => {}
                _ => best = Some(record),
            }
        }
        best.cloned()
    }
}
