use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider_ready: bool,
    pub live_workers: usize,
    pub queued_tasks: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.search_jobs.pool_stats();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            provider_ready: state.search_jobs.provider_ready(),
            live_workers: pool.live_workers,
            queued_tasks: pool.queued_tasks,
        }),
    )
}
