use std::sync::Arc;

use tokio::net::TcpListener;

use reelsearch::application::ports::{Clock, ResultStore, SearchProvider};
use reelsearch::application::services::{SearchJobManager, WorkerPool};
use reelsearch::infrastructure::observability::init_tracing;
use reelsearch::infrastructure::persistence::InMemoryResultStore;
use reelsearch::infrastructure::search::CatalogSearchProvider;
use reelsearch::infrastructure::time::SystemClock;
use reelsearch::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&settings.logging.tracing_config(environment));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let result_store: Arc<dyn ResultStore> =
        Arc::new(InMemoryResultStore::new(clock, settings.jobs.timings()));

    let catalog = Arc::new(CatalogSearchProvider::new());
    catalog.spawn_load(settings.catalog.path.clone());
    let provider: Arc<dyn SearchProvider> = catalog;

    let worker_pool = Arc::new(WorkerPool::new(settings.pool.worker_pool_config()));

    let search_jobs = Arc::new(SearchJobManager::new(
        provider,
        result_store,
        Arc::clone(&worker_pool),
    ));

    let router = create_router(AppState::new(search_jobs));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        environment = %environment,
        processing_delay_ms = settings.jobs.processing_delay_ms,
        result_ttl_ms = settings.jobs.result_ttl_ms,
        "Listening on {}",
        addr
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker_pool.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
