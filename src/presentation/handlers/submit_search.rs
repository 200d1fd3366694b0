use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::services::SubmitError;
use crate::domain::SearchReference;
use crate::infrastructure::observability::sanitize_query;
use crate::presentation::state::AppState;

use super::responses::error_response;

const RETRY_AFTER_SECONDS: &str = "1";

/// Absolute when the request names its host, relative otherwise.
fn results_location(headers: &HeaderMap, reference: SearchReference) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty() && !host.contains(['/', '\\', '@']));
    match host {
        Some(host) => format!("http://{}/movies/results/{}", host, reference),
        None => format!("/movies/results/{}", reference),
    }
}

/// Starts a search and redirects the client to where its results will appear.
#[tracing::instrument(skip(state, query, headers), fields(query = %sanitize_query(&query)))]
pub async fn submit_search_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
    headers: HeaderMap,
) -> Response {
    match state.search_jobs.submit(&query).await {
        Ok(reference) => Redirect::to(&results_location(&headers, reference)).into_response(),
        Err(SubmitError::EmptyQuery) => {
            tracing::warn!("Search request with empty query");
            error_response(StatusCode::BAD_REQUEST, "Query must not be empty")
        }
        Err(e @ SubmitError::Unavailable(_)) => {
            tracing::warn!(error = %e, "Search submission refused");
            let mut response = error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string());
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECONDS),
            );
            response
        }
        Err(e @ SubmitError::Store(_)) => {
            tracing::error!(error = %e, "Failed to register search");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to register search: {}", e),
            )
        }
    }
}
