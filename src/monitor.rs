//! Run-scoped ownership of all diagnostic state for one search run.

use serde::{Deserialize, Serialize};

use crate::progress::{IterationProgressRecorder, IterationRecord};
use crate::traits::Id;
use crate::unassigned::{UnassignedReason, UnassignmentReasonTracker};

/// Aggregated diagnosis for one job left unserved during the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDiagnosis<J> {
    pub job_id: J,
    /// Most likely cause across the whole run.
    pub reason: UnassignedReason,
    /// How often the job was reported unassigned.
    pub observations: u64,
}

/// Summary of one finished search run.
///
/// Persistence and formatting are the caller's concern; the report is plain
/// serializable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport<J> {
    /// Best-solution history ordered by iteration index.
    pub iterations: Vec<IterationRecord>,
    /// Per-job diagnoses ordered by job id.
    pub unassigned: Vec<JobDiagnosis<J>>,
}

/// Owns the progress recorder and unassignment tracker for a single run.
///
/// Created at run start, wired into the search engine's iteration
/// callbacks, and consumed into a [`RunReport`] once the search stops.
/// Scoping the state to this object keeps runs independent of each other.
#[derive(Debug)]
pub struct SearchMonitor<J: Id> {
    progress: IterationProgressRecorder,
    unassignments: UnassignmentReasonTracker<J>,
}

impl<J: Id> Default for SearchMonitor<J> {
    fn default() -> Self {
        Self {
            progress: IterationProgressRecorder::new(),
            unassignments: UnassignmentReasonTracker::new(),
        }
    }
}

impl<J: Id> SearchMonitor<J> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> &IterationProgressRecorder {
        &self.progress
    }

    pub fn unassignments(&self) -> &UnassignmentReasonTracker<J> {
        &self.unassignments
    }

    /// Consumes the run state into its final report.
    pub fn into_report(self) -> RunReport<J>
    where
        J: Ord,
    {
        let iterations = self.progress.history();

        let mut job_ids = self.unassignments.job_ids();
        job_ids.sort();

        let unassigned = job_ids
            .into_iter()
            .filter_map(|job_id| {
                let reason = self.unassignments.most_likely_reason(&job_id)?;
                let observations = self.unassignments.observation_count(&job_id);
                Some(JobDiagnosis {
                    job_id,
                    reason,
                    observations,
                })
            })
            .collect::<Vec<_>>();

        tracing::info!(
            iterations = iterations.len(),
            unassigned_jobs = unassigned.len(),
            "search run finished"
        );

        RunReport {
            iterations,
            unassigned,
        }
    }
}
