//! Retailer-direct source: one placeholder per reachable careers page.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{parse_base_url, ListingSource};
use crate::config::{EmployerConfig, SearchConfig};
use crate::error::SourceResult;
use crate::fetcher::Fetcher;
use crate::types::{generate_id, JobRecord, SourceKind};

pub const DIRECT_TITLE: &str = "Seasonal/Part-Time Position";
pub const DIRECT_JOB_TYPE: &str = "Seasonal/Part-Time";
pub const DIRECT_SALARY: &str = "Check company site";

/// Checks each configured employer's careers page.
pub struct DirectSource {
    employers: Vec<EmployerConfig>,
    location: String,
}

impl DirectSource {
    /// Employer URLs are stored in parsed form so placeholders share a dedupe
    /// key with the same page scraped elsewhere.
    pub fn from_config(config: &SearchConfig) -> SourceResult<Self> {
        let employers = config
            .employers
            .iter()
            .map(|employer| {
                let url = parse_base_url(&employer.url)?;
                Ok(EmployerConfig {
                    url: url.to_string(),
                    ..employer.clone()
                })
            })
            .collect::<SourceResult<Vec<_>>>()?;

        Ok(Self {
            employers,
            location: config.location.clone(),
        })
    }
}

#[async_trait]
impl ListingSource for DirectSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Direct
    }

    async fn collect(&self, fetcher: &dyn Fetcher) -> SourceResult<Vec<JobRecord>> {
        let mut jobs = Vec::new();

        for employer in &self.employers {
            // Liveness only; the page body is not parsed
            match fetcher.fetch(&employer.url).await {
                Ok(_) => {
                    debug!(employer = %employer.name, "Careers page reachable");
                    jobs.push(placeholder_record(employer, &self.location));
                }
                Err(e) => {
                    warn!(employer = %employer.name, error = %e, "Careers page check failed");
                }
            }
        }

        Ok(jobs)
    }
}

/// The "visit this employer's careers page" record.
pub fn placeholder_record(employer: &EmployerConfig, location: &str) -> JobRecord {
    let slug = employer
        .name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    JobRecord::new(SourceKind::Direct, DIRECT_TITLE, employer.url.clone())
        .with_id(generate_id(&slug))
        .with_company(employer.name.clone())
        .with_location(location)
        .with_job_type(DIRECT_JOB_TYPE)
        .with_salary(DIRECT_SALARY)
        .with_description(format!(
            "Visit {} careers page for {} positions",
            employer.name, employer.keywords
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[test]
    fn test_placeholder_record_fields() {
        let employer = EmployerConfig::new("Home Depot", "https://careers.homedepot.com", "seasonal associate");

        let job = placeholder_record(&employer, "Redding, CA");

        assert!(job.id.starts_with("home-depot-"));
        assert_eq!(job.title, DIRECT_TITLE);
        assert_eq!(job.company, "Home Depot");
        assert_eq!(job.url, "https://careers.homedepot.com");
        assert_eq!(job.source, SourceKind::Direct);
        assert_eq!(job.salary, DIRECT_SALARY);
        assert_eq!(
            job.description,
            "Visit Home Depot careers page for seasonal associate positions"
        );
    }

    #[tokio::test]
    async fn test_one_record_per_reachable_employer() {
        let config = SearchConfig::default().with_employers(vec![
            EmployerConfig::new("Amazon", "https://www.amazon.jobs/en", "seasonal warehouse"),
            EmployerConfig::new("Costco", "https://www.costco.com/careers", "seasonal stock"),
            EmployerConfig::new("Lowe's", "https://careers.lowes.com/search-jobs", "seasonal retail"),
        ]);
        let source = DirectSource::from_config(&config).unwrap();
        let fetcher = MockFetcher::new()
            .with_body("https://www.amazon.jobs", "<html></html>")
            .failing("https://www.costco.com")
            .with_body("https://careers.lowes.com", "<html></html>");

        let jobs = source.collect(&fetcher).await.unwrap();

        let companies: Vec<&str> = jobs.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(companies, vec!["Amazon", "Lowe's"]);
        assert_eq!(fetcher.call_count(), 3);
    }

    #[tokio::test]
    async fn test_placeholder_urls_are_normalized() {
        let config = SearchConfig::default().with_employers(vec![EmployerConfig::new(
            "Home Depot",
            "https://Careers.HomeDepot.com",
            "seasonal associate",
        )]);
        let source = DirectSource::from_config(&config).unwrap();
        let fetcher = MockFetcher::new().with_body("https://careers.homedepot.com", "<html></html>");

        let jobs = source.collect(&fetcher).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://careers.homedepot.com/");
        assert_eq!(fetcher.calls(), vec!["https://careers.homedepot.com/".to_string()]);
    }
}
