//! Typed errors for the scraping library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the server can
//! tell a dead source apart from a broken configuration.

use thiserror::Error;

use crate::types::SourceKind;

/// Errors from a single outbound fetch.
///
/// Every variant means the same thing to a caller: this source produced
/// no data. The variants only exist so logs say why.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// DNS, connect or TLS failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream answered outside the 2xx range
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Per-fetch timeout elapsed
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Response arrived but the body could not be read
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors that fail an entire source family.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A configured address is not a usable absolute URL
    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The overall aggregation deadline expired while this source ran
    #[error("{kind} exceeded the aggregation deadline")]
    DeadlineExceeded { kind: SourceKind },
}

/// Errors loading or validating a search configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read search config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid search config: {reason}")]
    Invalid { reason: String },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
