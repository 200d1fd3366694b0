mod clock;
mod result_store;
mod result_store_error;
mod search_provider;

pub use clock::Clock;
pub use result_store::ResultStore;
pub use result_store_error::ResultStoreError;
pub use search_provider::{SearchProvider, SearchProviderError};
