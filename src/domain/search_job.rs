use std::sync::OnceLock;

use super::{
    ComputationOutcome, ComputationState, Entry, JobTimings, JobView, SearchReference, Timestamp,
};

/// A submitted search and its timing windows.
///
/// Everything except the outcome is fixed at creation. The outcome is written
/// at most once and becomes visible to every reader in a single step.
#[derive(Debug)]
pub struct SearchJob {
    pub reference: SearchReference,
    pub query: String,
    pub submitted_at: Timestamp,
    pub ready_at: Timestamp,
    pub expires_at: Timestamp,
    outcome: OnceLock<ComputationOutcome>,
}

impl SearchJob {
    pub fn new(
        reference: SearchReference,
        query: String,
        submitted_at: Timestamp,
        timings: &JobTimings,
    ) -> Self {
        let ready_at = submitted_at.saturating_add(timings.processing_delay);
        let expires_at = ready_at.saturating_add(timings.result_ttl);
        Self {
            reference,
            query,
            submitted_at,
            ready_at,
            expires_at,
            outcome: OnceLock::new(),
        }
    }

    pub fn computation_state(&self) -> ComputationState {
        self.outcome
            .get()
            .map_or(ComputationState::Running, ComputationOutcome::state)
    }

    /// Entries in provider order; empty unless the search completed.
    pub fn entries(&self) -> &[Entry] {
        match self.outcome.get() {
            Some(ComputationOutcome::Completed(entries)) => &entries[..],
            _ => &[],
        }
    }

    /// Records the terminal outcome. A second call hands its outcome back
    /// untouched.
    pub fn complete(&self, outcome: ComputationOutcome) -> Result<(), ComputationOutcome> {
        self.outcome.set(outcome)
    }

    /// Derives what a poller sees at `now`. Reads only.
    pub fn visible_state(&self, now: Timestamp) -> JobView {
        if now < self.ready_at {
            return JobView::Pending;
        }
        if now >= self.expires_at {
            return JobView::Gone;
        }
        match self.outcome.get() {
            None => JobView::StillComputing,
            Some(ComputationOutcome::Completed(entries)) => JobView::Ready(entries.clone()),
            Some(ComputationOutcome::Failed(message)) => JobView::Failed(message.clone()),
        }
    }
}
