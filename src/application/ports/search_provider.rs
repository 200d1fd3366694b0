use async_trait::async_trait;

use crate::domain::Entry;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Whether the provider can accept new searches right now.
    fn is_ready(&self) -> bool;

    /// Runs `query`, returning hits in the provider's own order.
    async fn search(&self, query: &str) -> Result<Vec<Entry>, SearchProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchProviderError {
    #[error("search provider is not ready")]
    NotReady,
    #[error("search execution failed: {0}")]
    ExecutionFailed(String),
    #[error("catalog unavailable: {0}")]
    Catalog(String),
}
