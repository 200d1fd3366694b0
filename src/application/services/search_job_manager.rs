use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::Instrument;

use crate::application::ports::{ResultStore, ResultStoreError, SearchProvider};
use crate::domain::{ComputationOutcome, JobView, SearchReference, Timestamp};

use super::worker_pool::{PoolError, PoolStats, WorkerPool, panic_message};

/// Accepts searches, hands them to the worker pool and answers polls.
pub struct SearchJobManager {
    provider: Arc<dyn SearchProvider>,
    result_store: Arc<dyn ResultStore>,
    worker_pool: Arc<WorkerPool>,
}

impl SearchJobManager {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        result_store: Arc<dyn ResultStore>,
        worker_pool: Arc<WorkerPool>,
    ) -> Self {
        Self {
            provider,
            result_store,
            worker_pool,
        }
    }

    pub fn provider_ready(&self) -> bool {
        self.provider.is_ready()
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.worker_pool.stats()
    }

    /// Registers a search and schedules it, returning before it runs.
    ///
    /// On any error nothing has been stored or scheduled.
    pub async fn submit(&self, query: &str) -> Result<SearchReference, SubmitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SubmitError::EmptyQuery);
        }

        if !self.provider.is_ready() {
            tracing::warn!("Search provider not ready, refusing submission");
            return Err(SubmitError::Unavailable(UnavailableReason::ProviderNotReady));
        }

        let slot = self.worker_pool.reserve().await.map_err(|e| match e {
            PoolError::Saturated => SubmitError::Unavailable(UnavailableReason::PoolSaturated),
            PoolError::ShutDown => SubmitError::Unavailable(UnavailableReason::PoolShutDown),
        })?;

        let reference = SearchReference::new();
        self.result_store.create(reference, query.to_string())?;

        let span = tracing::info_span!(
            "search_job",
            reference = %reference,
            query_len = query.len(),
        );
        let task = run_search(
            Arc::clone(&self.provider),
            Arc::clone(&self.result_store),
            reference,
            query.to_string(),
        )
        .instrument(span);
        slot.dispatch(Box::pin(task));

        tracing::info!(reference = %reference, "Search job enqueued");
        Ok(reference)
    }

    pub fn poll(&self, reference: SearchReference) -> Result<JobView, PollError> {
        self.result_store
            .view(reference)
            .map_err(|_| PollError::NotFound(reference))
    }

    pub fn poll_at(
        &self,
        reference: SearchReference,
        now: Timestamp,
    ) -> Result<JobView, PollError> {
        self.result_store
            .view_at(reference, now)
            .map_err(|_| PollError::NotFound(reference))
    }
}

/// Runs one search and posts its outcome to the store. Never fails outward.
async fn run_search(
    provider: Arc<dyn SearchProvider>,
    result_store: Arc<dyn ResultStore>,
    reference: SearchReference,
    query: String,
) {
    let outcome = match AssertUnwindSafe(provider.search(&query))
        .catch_unwind()
        .await
    {
        Ok(Ok(entries)) => {
            tracing::info!(results = entries.len(), "Search completed");
            ComputationOutcome::completed(entries)
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Search failed");
            ComputationOutcome::Failed(e.to_string())
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!(panic = %message, "Search provider panicked");
            ComputationOutcome::Failed(format!("search provider panicked: {}", message))
        }
    };

    if let Err(e) = result_store.complete(reference, outcome) {
        tracing::error!(error = %e, "Failed to record search outcome");
    }
}

/// Why a submission could not be accepted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    ProviderNotReady,
    PoolSaturated,
    PoolShutDown,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnavailableReason::ProviderNotReady => "search provider not ready",
            UnavailableReason::PoolSaturated => "worker pool saturated",
            UnavailableReason::PoolShutDown => "worker pool shut down",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("search provider unavailable: {}", .0.as_str())]
    Unavailable(UnavailableReason),
    #[error("result store: {0}")]
    Store(#[from] ResultStoreError),
}

impl SubmitError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Unavailable(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("search reference not found: {0}")]
    NotFound(SearchReference),
}
