use crate::domain::SearchReference;

#[derive(Debug, thiserror::Error)]
pub enum ResultStoreError {
    #[error("search reference not found: {0}")]
    NotFound(SearchReference),
    #[error("search reference already in use: {0}")]
    DuplicateReference(SearchReference),
    #[error("search already completed: {0}")]
    AlreadyCompleted(SearchReference),
}
