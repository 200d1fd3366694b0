use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;

use crate::application::ports::{Clock, ResultStore, ResultStoreError};
use crate::domain::{
    ComputationOutcome, ComputationState, JobTimings, JobView, SearchJob, SearchReference,
    Timestamp,
};

/// Process-local job table.
///
/// `DashMap` shards the table so inserts and lookups for different references
/// rarely contend; each job publishes its outcome on its own. Jobs are never
/// removed, only hidden once their window has passed.
pub struct InMemoryResultStore {
    jobs: DashMap<SearchReference, Arc<SearchJob>>,
    clock: Arc<dyn Clock>,
    timings: JobTimings,
}

impl InMemoryResultStore {
    pub fn new(clock: Arc<dyn Clock>, timings: JobTimings) -> Self {
        Self {
            jobs: DashMap::new(),
            clock,
            timings,
        }
    }

    /// Shared handle to a job record, detached from the map's shard lock.
    pub fn get(&self, reference: SearchReference) -> Option<Arc<SearchJob>> {
        self.jobs.get(&reference).map(|job| Arc::clone(job.value()))
    }

    fn job(&self, reference: SearchReference) -> Result<Arc<SearchJob>, ResultStoreError> {
        self.get(reference)
            .ok_or(ResultStoreError::NotFound(reference))
    }
}

impl ResultStore for InMemoryResultStore {
    #[tracing::instrument(skip(self, query), fields(reference = %reference))]
    fn create(&self, reference: SearchReference, query: String) -> Result<(), ResultStoreError> {
        match self.jobs.entry(reference) {
            MapEntry::Occupied(_) => Err(ResultStoreError::DuplicateReference(reference)),
            MapEntry::Vacant(slot) => {
                let job = SearchJob::new(reference, query, self.clock.now(), &self.timings);
                tracing::debug!(
                    submitted_at = job.submitted_at.as_millis(),
                    ready_at = job.ready_at.as_millis(),
                    expires_at = job.expires_at.as_millis(),
                    "Job created"
                );
                slot.insert(Arc::new(job));
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self, outcome), fields(reference = %reference, state = %outcome.state()))]
    fn complete(
        &self,
        reference: SearchReference,
        outcome: ComputationOutcome,
    ) -> Result<(), ResultStoreError> {
        self.job(reference)?
            .complete(outcome)
            .map_err(|_| ResultStoreError::AlreadyCompleted(reference))
    }

    fn view(&self, reference: SearchReference) -> Result<JobView, ResultStoreError> {
        let job = self.job(reference)?;
        Ok(job.visible_state(self.clock.now()))
    }

    fn view_at(
        &self,
        reference: SearchReference,
        now: Timestamp,
    ) -> Result<JobView, ResultStoreError> {
        Ok(self.job(reference)?.visible_state(now))
    }

    fn computation_state(&self, reference: SearchReference) -> Option<ComputationState> {
        self.jobs
            .get(&reference)
            .map(|job| job.computation_state())
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }
}
