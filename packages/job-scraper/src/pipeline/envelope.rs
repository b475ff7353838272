//! Response envelopes.
//!
//! A caller always receives exactly one of two shapes: `ScrapeResponse`
//! on success or `ScrapeFailure` when the request itself failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::JobRecord;

/// Successful aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    /// Always `jobs.len()`
    pub count: usize,
    pub jobs: Vec<JobRecord>,
    /// Request completion time
    pub timestamp: DateTime<Utc>,
}

impl ScrapeResponse {
    /// Truncate to `max_results`, keeping order, and wrap.
    pub fn capped(mut jobs: Vec<JobRecord>, max_results: usize) -> Self {
        jobs.truncate(max_results);
        Self {
            success: true,
            count: jobs.len(),
            jobs,
            timestamp: Utc::now(),
        }
    }
}

/// Failure envelope. `message` is for humans and never carries internal
/// error detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ScrapeFailure {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use crate::types::SourceKind;

    fn jobs(n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| record(&format!("https://x/{}", i), SourceKind::Indeed, "seasonal"))
            .collect()
    }

    #[test]
    fn test_caps_and_counts_after_truncation() {
        let response = ScrapeResponse::capped(jobs(73), 50);

        assert!(response.success);
        assert_eq!(response.jobs.len(), 50);
        assert_eq!(response.count, 50);
        assert_eq!(response.jobs[49].url, "https://x/49");
    }

    #[test]
    fn test_short_lists_are_untouched() {
        let response = ScrapeResponse::capped(jobs(3), 50);
        assert_eq!(response.count, 3);
    }

    #[test]
    fn test_success_wire_shape() {
        let value = serde_json::to_value(ScrapeResponse::capped(jobs(1), 50)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 1);
        assert!(value["jobs"].is_array());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_failure_wire_shape() {
        let value = serde_json::to_value(ScrapeFailure::new("Failed to scrape jobs", "try again")).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Failed to scrape jobs");
        assert_eq!(value["message"], "try again");
        assert!(value.get("jobs").is_none());
    }
}
