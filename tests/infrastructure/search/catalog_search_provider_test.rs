use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use reelsearch::application::ports::{SearchProvider, SearchProviderError};
use reelsearch::domain::Entry;
use reelsearch::infrastructure::search::CatalogSearchProvider;

const CATALOG_JSON: &str = r#"[
    { "title": "Coupling", "year": 2000, "summary": "Friends talk about LOVE and dating." },
    { "title": "Breaking Bad", "year": 2008 },
    { "title": "Love Hina", "summary": "Dormitory comedy." },
    { "title": "Beck: Mongolian Chop Squad", "summary": "A teenager's love of music." }
]"#;

fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn titles(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[tokio::test]
async fn given_unloaded_catalog_when_searching_then_not_ready() {
    let provider = CatalogSearchProvider::new();

    assert!(!provider.is_ready());
    assert!(matches!(
        provider.search("love").await,
        Err(SearchProviderError::NotReady)
    ));
}

#[tokio::test]
async fn given_catalog_file_when_loading_then_becomes_ready() {
    let file = catalog_file(CATALOG_JSON);
    let provider = CatalogSearchProvider::new();

    let count = provider.load_from_file(file.path()).await.unwrap();

    assert_eq!(count, 4);
    assert!(provider.is_ready());
}

#[tokio::test]
async fn given_loaded_catalog_when_searching_then_matches_title_and_summary_in_catalog_order() {
    let file = catalog_file(CATALOG_JSON);
    let provider = CatalogSearchProvider::new();
    provider.load_from_file(file.path()).await.unwrap();

    let results = provider.search("Love").await.unwrap();

    assert_eq!(
        titles(&results),
        vec!["Coupling", "Love Hina", "Beck: Mongolian Chop Squad"]
    );
}

#[tokio::test]
async fn given_loaded_catalog_when_nothing_matches_then_returns_empty() {
    let provider = CatalogSearchProvider::from_entries(vec![Entry::new("Firefly")]);

    let results = provider.search("zzz").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn given_malformed_catalog_when_loading_then_errors_and_stays_not_ready() {
    let file = catalog_file("{ not json");
    let provider = CatalogSearchProvider::new();

    let result = provider.load_from_file(file.path()).await;

    assert!(matches!(result, Err(SearchProviderError::Catalog(_))));
    assert!(!provider.is_ready());
}

#[tokio::test]
async fn given_missing_catalog_when_loading_then_errors() {
    let provider = CatalogSearchProvider::new();

    let result = provider
        .load_from_file(std::path::Path::new("/definitely/not/here.json"))
        .await;

    assert!(matches!(result, Err(SearchProviderError::Catalog(_))));
}

#[tokio::test]
async fn given_loaded_catalog_when_loading_again_then_rejected() {
    let file = catalog_file(CATALOG_JSON);
    let provider = CatalogSearchProvider::from_entries(vec![Entry::new("Firefly")]);

    let result = provider.load_from_file(file.path()).await;

    assert!(result.is_err());
    assert_eq!(
        titles(&provider.search("fire").await.unwrap()),
        vec!["Firefly"]
    );
}

#[tokio::test]
async fn given_spawned_load_when_finished_then_provider_is_ready() {
    let file = catalog_file(CATALOG_JSON);
    let provider = Arc::new(CatalogSearchProvider::new());

    let handle = provider.spawn_load(file.path().to_path_buf());
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    assert!(provider.is_ready());
}
