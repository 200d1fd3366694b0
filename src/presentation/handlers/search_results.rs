use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::PollError;
use crate::domain::{JobView, SearchReference};
use crate::presentation::state::AppState;

use super::responses::{SearchStatusResponse, error_response};

/// Reports where a submitted search stands.
///
/// 202 while it is not yet due or still running, 200 with the entries once
/// ready, 410 after its results have expired.
#[tracing::instrument(skip(state))]
pub async fn search_results_handler(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Response {
    let Ok(parsed) = reference.parse::<SearchReference>() else {
        tracing::debug!("Malformed search reference");
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Search not found: {}", reference),
        );
    };

    let view = match state.search_jobs.poll(parsed) {
        Ok(view) => view,
        Err(PollError::NotFound(_)) => {
            return error_response(
                StatusCode::NOT_FOUND,
                format!("Search not found: {}", reference),
            );
        }
    };

    let visible = view.state();
    tracing::debug!(state = %visible, "Search polled");

    match view {
        JobView::Ready(entries) => (StatusCode::OK, Json(&entries[..])).into_response(),
        JobView::Pending | JobView::StillComputing => (
            StatusCode::ACCEPTED,
            Json(SearchStatusResponse {
                reference,
                status: visible.as_str().to_string(),
            }),
        )
            .into_response(),
        JobView::Failed(message) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search failed: {}", message),
        ),
        JobView::Gone => (
            StatusCode::GONE,
            Json(SearchStatusResponse {
                reference,
                status: visible.as_str().to_string(),
            }),
        )
            .into_response(),
    }
}
