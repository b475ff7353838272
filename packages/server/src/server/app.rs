//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::Method,
    middleware,
    routing::get,
    Router,
};
use job_scraper::{HttpFetcher, ScrapePipeline};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::middleware::extract_client_ip;
use crate::server::routes::{health_handler, method_not_allowed, scrape_jobs_handler};

/// Shared application state
///
/// Immutable after startup; every request gets its own pipeline run.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScrapePipeline>,
}

/// Build the live pipeline (reqwest fetcher, configured sources) and router.
pub fn build_app(config: &Config) -> Result<Router> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout)
        .context("Failed to build HTTP client")?;

    let pipeline = ScrapePipeline::from_config(&config.search, Arc::new(fetcher))
        .context("Failed to build scrape sources")?
        .with_deadline(config.request_deadline);

    tracing::info!(
        sources = ?pipeline.enabled_sources(),
        excluded_terms = ?pipeline.filter().terms(),
        "Scrape pipeline ready"
    );

    Ok(build_router(Arc::new(pipeline)))
}

/// Build the Axum application router around an already-built pipeline
pub fn build_router(pipeline: Arc<ScrapePipeline>) -> Router {
    let app_state = AppState { pipeline };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route(
            "/api/scrapeJobs",
            // get() also answers HEAD unless HEAD has its own handler
            get(scrape_jobs_handler)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
