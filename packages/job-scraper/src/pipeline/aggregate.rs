//! Best-effort aggregation across source families.

use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::fetcher::Fetcher;
use crate::sources::ListingSource;
use crate::types::{JobRecord, SourceKind};

/// What one source family contributed to a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceOutcome {
    pub source: SourceKind,
    pub records: usize,
    /// Failure reason when the whole family failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceOutcome {
    fn collected(source: SourceKind, records: usize) -> Self {
        Self {
            source,
            records,
            error: None,
        }
    }

    fn failed(source: SourceKind, error: &SourceError) -> Self {
        Self {
            source,
            records: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Concatenated records plus per-source outcomes.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub jobs: Vec<JobRecord>,
    pub outcomes: Vec<SourceOutcome>,
}

impl AggregateReport {
    pub fn failed_sources(&self) -> Vec<SourceKind> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| o.source)
            .collect()
    }
}

/// Run one source family and turn any failure into zero records.
///
/// This is the only place a family-level error is handled. The family runs
/// until `deadline`; if it is still running then, it counts as failed.
pub async fn attempt_source(
    source: &dyn ListingSource,
    fetcher: &dyn Fetcher,
    deadline: Instant,
) -> (Vec<JobRecord>, SourceOutcome) {
    let kind = source.kind();

    let result = match tokio::time::timeout_at(deadline, source.collect(fetcher)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::DeadlineExceeded { kind }),
    };

    match result {
        Ok(jobs) => {
            info!(source = %kind, records = jobs.len(), "Source collected");
            let outcome = SourceOutcome::collected(kind, jobs.len());
            (jobs, outcome)
        }
        Err(e) => {
            warn!(source = %kind, error = %e, "Source failed, contributing zero records");
            (Vec::new(), SourceOutcome::failed(kind, &e))
        }
    }
}

/// Run every source in order and concatenate their records.
///
/// Sources run sequentially; each one's emission order is preserved.
pub async fn aggregate(
    sources: &[Box<dyn ListingSource>],
    fetcher: &dyn Fetcher,
    deadline: Instant,
) -> AggregateReport {
    let mut report = AggregateReport::default();

    for source in sources {
        let (jobs, outcome) = attempt_source(source.as_ref(), fetcher, deadline).await;
        report.jobs.extend(jobs);
        report.outcomes.push(outcome);
    }

    report
}
