//! HTTP error type rendering the failure envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use job_scraper::ScrapeFailure;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// Errors that abort a request. Each renders as a `ScrapeFailure` body;
/// internal detail is logged and never sent to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("scrape task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> ScrapeFailure {
        match self {
            ApiError::MethodNotAllowed => ScrapeFailure::new(
                "Method not allowed",
                "Only GET requests are supported on this endpoint",
            ),
            ApiError::TaskFailed(_) => ScrapeFailure::new(
                "Failed to scrape jobs",
                "An unexpected error occurred while gathering listings",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(self.envelope())).into_response()
    }
}
