//! Normalized job listing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Salary text used when a source does not expose pay.
pub const SALARY_NOT_SPECIFIED: &str = "Not specified";

/// Which external site a record came from.
///
/// Declaration order is aggregation order, and aggregation order is the
/// dedupe tie-break: an Indeed record beats a Craigslist record for the
/// same URL, which beats a Direct record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    Indeed,
    Craigslist,
    Direct,
}

impl SourceKind {
    /// All known sources in aggregation order.
    pub const ALL: [SourceKind; 3] = [SourceKind::Indeed, SourceKind::Craigslist, SourceKind::Direct];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Indeed => "Indeed",
            SourceKind::Craigslist => "Craigslist",
            SourceKind::Direct => "Direct",
        }
    }

    /// Lowercase prefix for record ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SourceKind::Indeed => "indeed",
            SourceKind::Craigslist => "craigslist",
            SourceKind::Direct => "direct",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indeed" => Ok(SourceKind::Indeed),
            "craigslist" => Ok(SourceKind::Craigslist),
            "direct" => Ok(SourceKind::Direct),
            other => Err(format!("unknown source: {}", other)),
        }
    }
}

/// One normalized listing.
///
/// Produced by a source parser and never modified afterwards; pipeline
/// stages only drop or reorder records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Source-prefixed id, unique within one response only
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free-text classification such as "Seasonal"
    #[serde(rename = "type")]
    pub job_type: String,
    /// Absolute listing URL, the dedupe key
    pub url: String,
    pub source: SourceKind,
    pub salary: String,
    /// Free text checked by the content filter
    pub description: String,
    pub posted_date: DateTime<Utc>,
}

impl JobRecord {
    /// Create a record with a fresh id and default salary.
    pub fn new(source: SourceKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: generate_id(source.id_prefix()),
            title: title.into(),
            company: String::new(),
            location: String::new(),
            job_type: String::new(),
            url: url.into(),
            source,
            salary: SALARY_NOT_SPECIFIED.to_string(),
            description: String::new(),
            posted_date: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = job_type.into();
        self
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = salary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_posted_date(mut self, posted_date: DateTime<Utc>) -> Self {
        self.posted_date = posted_date;
        self
    }
}

/// Build a `<prefix>-<millis>-<random>` id.
///
/// Time plus a random suffix is enough for uniqueness inside one
/// response; ids are not stable across runs.
pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_wire_field_names() {
        let job = JobRecord::new(SourceKind::Indeed, "Stocker", "https://www.indeed.com/viewjob?jk=1")
            .with_job_type("Seasonal");

        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["type"], "Seasonal");
        assert_eq!(value["source"], "Indeed");
        assert_eq!(value["salary"], SALARY_NOT_SPECIFIED);
        assert!(value.get("postedDate").is_some());
        assert!(value.get("job_type").is_none());
        assert!(value.get("posted_date").is_none());
    }

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let a = JobRecord::new(SourceKind::Craigslist, "A", "https://x/1.html");
        let b = JobRecord::new(SourceKind::Craigslist, "B", "https://x/2.html");

        assert!(a.id.starts_with("craigslist-"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_source_kind_parses_case_insensitively() {
        assert_eq!("indeed".parse::<SourceKind>().unwrap(), SourceKind::Indeed);
        assert_eq!(" Direct ".parse::<SourceKind>().unwrap(), SourceKind::Direct);
        assert!("linkedin".parse::<SourceKind>().is_err());
    }
}
