use axum::{extract::Extension, Json};
use job_scraper::ScrapeResponse;
use std::time::Instant;
use tracing::info;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::ClientIp;

/// Run the scrape pipeline once.
///
/// The run happens on its own task so that a panic inside a parser
/// surfaces as a `JoinError` and becomes the failure envelope.
pub async fn scrape_jobs_handler(
    Extension(state): Extension<AppState>,
    client_ip: Option<Extension<ClientIp>>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let client = client_ip
        .map(|Extension(ip)| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let started = Instant::now();

    let pipeline = state.pipeline.clone();
    let response = tokio::spawn(async move { pipeline.run().await }).await?;

    info!(
        client_ip = %client,
        count = response.count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Scrape request served"
    );

    Ok(Json(response))
}

/// Any non-GET method on the scrape endpoint.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
