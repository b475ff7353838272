//! Scrape → aggregate → dedupe → filter → cap.
//!
//! One `ScrapePipeline` is built at startup and shared across requests. It
//! holds no mutable state; every run builds its own accumulators.

pub mod aggregate;
pub mod dedupe;
pub mod envelope;
pub mod filter;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

use crate::config::SearchConfig;
use crate::error::SourceResult;
use crate::fetcher::Fetcher;
use crate::sources::{build_sources, ListingSource};
use crate::types::{JobRecord, SourceKind};

pub use aggregate::{aggregate, attempt_source, AggregateReport, SourceOutcome};
pub use dedupe::dedupe_by_url;
pub use envelope::{ScrapeFailure, ScrapeResponse};
pub use filter::ContentFilter;

/// Overall budget for one aggregation run.
pub const DEFAULT_AGGREGATION_DEADLINE: Duration = Duration::from_secs(25);

pub struct ScrapePipeline {
    fetcher: Arc<dyn Fetcher>,
    sources: Vec<Box<dyn ListingSource>>,
    filter: ContentFilter,
    max_results: usize,
    deadline: Duration,
}

impl ScrapePipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sources: Vec<Box<dyn ListingSource>>,
        filter: ContentFilter,
        max_results: usize,
    ) -> Self {
        Self {
            fetcher,
            sources,
            filter,
            max_results,
            deadline: DEFAULT_AGGREGATION_DEADLINE,
        }
    }

    /// Build the enabled sources and filter from a search configuration.
    pub fn from_config(config: &SearchConfig, fetcher: Arc<dyn Fetcher>) -> SourceResult<Self> {
        Ok(Self::new(
            fetcher,
            build_sources(config)?,
            ContentFilter::new(&config.excluded_terms),
            config.max_results,
        ))
    }

    /// Set the overall aggregation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn enabled_sources(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    /// Run every source and concatenate their records.
    pub async fn collect(&self) -> AggregateReport {
        let deadline = Instant::now() + self.deadline;
        aggregate(&self.sources, self.fetcher.as_ref(), deadline).await
    }

    /// Dedupe, filter and cap already-aggregated records.
    pub fn finish(&self, jobs: Vec<JobRecord>) -> ScrapeResponse {
        refine(jobs, &self.filter, self.max_results)
    }

    /// Full run: always yields a success envelope, possibly empty.
    pub async fn run(&self) -> ScrapeResponse {
        let report = self.collect().await;
        let aggregated = report.jobs.len();
        let failed = report.failed_sources();

        let response = self.finish(report.jobs);

        info!(
            aggregated = aggregated,
            returned = response.count,
            failed_sources = ?failed,
            "Scrape run complete"
        );

        response
    }
}

/// Dedupe by URL, drop excluded descriptions, truncate to `max_results`.
pub fn refine(jobs: Vec<JobRecord>, filter: &ContentFilter, max_results: usize) -> ScrapeResponse {
    let unique = dedupe_by_url(jobs);
    let kept = filter.apply(unique);
    ScrapeResponse::capped(kept, max_results)
}
