//! Search configuration: what to look for and where.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the stock deployment: seasonal work around Redding, CA, with
//! hospitality and food-service postings filtered out.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::types::SourceKind;

/// Cap on returned listings. Default: 50.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Configuration for one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Location sent to listing sites and stamped on records.
    pub location: String,

    /// Search keywords, in priority order.
    pub keywords: Vec<String>,

    /// How many keywords the listing site is queried with.
    ///
    /// Each keyword costs one outbound request, so only the first few
    /// are used. Default: 2.
    pub max_keywords: usize,

    pub indeed: IndeedConfig,

    pub craigslist: CraigslistConfig,

    /// Employers whose careers pages are checked directly.
    pub employers: Vec<EmployerConfig>,

    /// Case-insensitive substrings; a record whose description contains
    /// any of them is dropped.
    pub excluded_terms: Vec<String>,

    /// Sources to query. Order here is ignored; sources always run in
    /// aggregation order.
    pub enabled_sources: Vec<SourceKind>,

    /// Maximum listings in one response. Default: 50.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            location: "Redding, CA".to_string(),
            keywords: ["seasonal", "temporary", "part-time", "holiday", "warehouse", "retail"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            max_keywords: 2,
            indeed: IndeedConfig::default(),
            craigslist: CraigslistConfig::default(),
            employers: default_employers(),
            excluded_terms: ["hospitality", "restaurant", "hotel", "food service"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            enabled_sources: SourceKind::ALL.to_vec(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: SearchConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    pub fn with_excluded_terms(mut self, terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_terms = terms.into_iter().map(|t| t.into()).collect();
        self
    }

    pub fn with_employers(mut self, employers: Vec<EmployerConfig>) -> Self {
        self.employers = employers;
        self
    }

    pub fn with_enabled_sources(mut self, sources: impl IntoIterator<Item = SourceKind>) -> Self {
        self.enabled_sources = sources.into_iter().collect();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn is_enabled(&self, source: SourceKind) -> bool {
        self.enabled_sources.contains(&source)
    }

    /// Keywords actually sent to the listing site.
    pub fn active_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .take(self.max_keywords)
    }

    /// Reject configurations that would produce invalid records.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_results == 0 {
            return Err(invalid("max_results must be greater than zero"));
        }
        check_absolute("indeed.base_url", &self.indeed.base_url)?;
        check_absolute("craigslist.base_url", &self.craigslist.base_url)?;
        for employer in &self.employers {
            if employer.name.trim().is_empty() {
                return Err(invalid("employer name must not be empty"));
            }
            check_absolute(&format!("employers[{}].url", employer.name), &employer.url)?;
        }
        Ok(())
    }
}

/// Listing-site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndeedConfig {
    /// Site origin; search requests go to `<base_url>/jobs` and relative
    /// listing links resolve against it.
    pub base_url: String,

    /// Value of the `jt` job-type query parameter.
    pub job_type: String,

    /// Maximum listings taken per keyword. Default: 20.
    pub per_keyword_cap: usize,
}

impl Default for IndeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.indeed.com".to_string(),
            job_type: "seasonal".to_string(),
            per_keyword_cap: 20,
        }
    }
}

/// Classified-site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraigslistConfig {
    /// Regional site origin.
    pub base_url: String,

    /// Category path segment (`jjj` is "all jobs").
    pub category: String,

    /// Free-text query within the category.
    pub query: String,

    /// Maximum listings taken. Default: 15.
    pub cap: usize,
}

impl Default for CraigslistConfig {
    fn default() -> Self {
        Self {
            base_url: "https://redding.craigslist.org".to_string(),
            category: "jjj".to_string(),
            query: "seasonal temporary part-time".to_string(),
            cap: 15,
        }
    }
}

/// An employer whose careers page is checked for liveness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerConfig {
    pub name: String,
    pub url: String,
    /// Topic words used in the placeholder description.
    pub keywords: String,
}

impl EmployerConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            keywords: keywords.into(),
        }
    }
}

fn default_employers() -> Vec<EmployerConfig> {
    vec![
        EmployerConfig::new(
            "Amazon",
            "https://www.amazon.jobs/en/locations/redding-california",
            "seasonal warehouse",
        ),
        EmployerConfig::new("Costco", "https://www.costco.com/careers", "seasonal stock"),
        EmployerConfig::new("Lowe's", "https://careers.lowes.com/search-jobs", "seasonal retail"),
        EmployerConfig::new("Home Depot", "https://careers.homedepot.com", "seasonal associate"),
        EmployerConfig::new(
            "Dicks Sporting Goods",
            "https://www.dickssportinggoods.com/careers",
            "part-time retail",
        ),
    ]
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

fn check_absolute(field: &str, raw: &str) -> ConfigResult<()> {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(invalid(format!(
            "{} must use http or https, got {}",
            field,
            url.scheme()
        ))),
        Err(e) => Err(invalid(format!("{} is not an absolute URL: {}", field, e))),
    }
}
