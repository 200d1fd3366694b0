use crate::domain::{ComputationOutcome, ComputationState, JobView, SearchReference, Timestamp};

use super::ResultStoreError;

/// Owns every submitted job and derives what pollers see.
///
/// Calls never block on a search; they touch only the job record involved.
pub trait ResultStore: Send + Sync {
    /// Registers a running job stamped with the store clock's current time.
    fn create(&self, reference: SearchReference, query: String) -> Result<(), ResultStoreError>;

    /// Publishes the terminal outcome of a job's search.
    fn complete(
        &self,
        reference: SearchReference,
        outcome: ComputationOutcome,
    ) -> Result<(), ResultStoreError>;

    /// Visible state at the store clock's current time.
    fn view(&self, reference: SearchReference) -> Result<JobView, ResultStoreError>;

    /// Visible state at an explicit time.
    fn view_at(
        &self,
        reference: SearchReference,
        now: Timestamp,
    ) -> Result<JobView, ResultStoreError>;

    fn computation_state(&self, reference: SearchReference) -> Option<ComputationState>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
