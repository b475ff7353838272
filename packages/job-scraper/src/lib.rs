//! Seasonal Job Listing Scraper
//!
//! Best-effort aggregation of job listings from a few external sites.
//! Each source is fetched and parsed independently; a dead source reduces
//! the result, it never fails the request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use job_scraper::{HttpFetcher, ScrapePipeline, SearchConfig};
//!
//! let config = SearchConfig::default();
//! let fetcher = Arc::new(HttpFetcher::with_defaults()?);
//! let pipeline = ScrapePipeline::from_config(&config, fetcher)?;
//!
//! let response = pipeline.run().await;
//! assert_eq!(response.count, response.jobs.len());
//! ```
//!
//! # Modules
//!
//! - [`fetcher`] - Outbound GET abstraction and the reqwest implementation
//! - [`sources`] - Per-site extraction rules (Indeed, Craigslist, Direct)
//! - [`pipeline`] - Aggregation, deduplication, filtering and envelopes
//! - [`config`] - Search configuration (TOML)
//! - [`testing`] - Mock fetcher and markup fixtures

pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod sources;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use config::{CraigslistConfig, EmployerConfig, IndeedConfig, SearchConfig, DEFAULT_MAX_RESULTS};
pub use error::{ConfigError, FetchError, SourceError};
pub use fetcher::{Fetcher, HttpFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
pub use pipeline::{
    dedupe_by_url, refine, AggregateReport, ContentFilter, ScrapeFailure, ScrapePipeline,
    ScrapeResponse, SourceOutcome, DEFAULT_AGGREGATION_DEADLINE,
};
pub use sources::{build_sources, CraigslistSource, DirectSource, IndeedSource, ListingSource};
pub use types::{JobRecord, SourceKind};
