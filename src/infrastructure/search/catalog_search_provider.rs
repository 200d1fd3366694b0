use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::application::ports::{SearchProvider, SearchProviderError};
use crate::domain::Entry;

/// Searches an in-memory movie catalog.
///
/// The provider starts empty and reports itself not ready until a catalog has
/// been installed, either directly or by loading a JSON array of entries.
#[derive(Debug, Default)]
pub struct CatalogSearchProvider {
    catalog: OnceLock<Vec<Entry>>,
}

impl CatalogSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let provider = Self::new();
        let _ = provider.catalog.set(entries);
        provider
    }

    /// Reads and installs the catalog at `path`. A catalog can be installed
    /// only once; later loads are rejected.
    pub async fn load_from_file(&self, path: &Path) -> Result<usize, SearchProviderError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchProviderError::Catalog(format!("{}: {}", path.display(), e)))?;
        let entries: Vec<Entry> = serde_json::from_str(&raw)
            .map_err(|e| SearchProviderError::Catalog(format!("{}: {}", path.display(), e)))?;
        let count = entries.len();
        self.catalog
            .set(entries)
            .map_err(|_| SearchProviderError::Catalog("catalog already loaded".to_string()))?;
        Ok(count)
    }

    /// Loads the catalog in the background so the server can start serving
    /// (and answering 503) before the data is in.
    pub fn spawn_load(self: &Arc<Self>, path: PathBuf) -> tokio::task::JoinHandle<()> {
        let provider = Arc::clone(self);
        tokio::spawn(async move {
            match provider.load_from_file(&path).await {
                Ok(count) => {
                    tracing::info!(entries = count, path = %path.display(), "Catalog loaded")
                }
                Err(e) => tracing::error!(error = %e, "Catalog load failed"),
            }
        })
    }
}

#[async_trait]
impl SearchProvider for CatalogSearchProvider {
    fn is_ready(&self) -> bool {
        self.catalog.get().is_some()
    }

    async fn search(&self, query: &str) -> Result<Vec<Entry>, SearchProviderError> {
        let catalog = self.catalog.get().ok_or(SearchProviderError::NotReady)?;
        let needle = query.trim().to_lowercase();
        Ok(catalog
            .iter()
            .filter(|entry| entry.matches(&needle))
            .cloned()
            .collect())
    }
}
