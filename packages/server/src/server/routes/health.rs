use axum::{extract::Extension, http::StatusCode, Json};
use job_scraper::SourceKind;
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    sources: Vec<SourceKind>,
}

/// Health check endpoint
///
/// Returns 200 OK with the enabled sources, or 503 Service Unavailable when
/// every source has been disabled and the scrape endpoint can only ever
/// return an empty list.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let sources = state.pipeline.enabled_sources();
    let is_healthy = !sources.is_empty();

    let overall_status = if is_healthy { "healthy" } else { "unhealthy" };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            sources,
        }),
    )
}
