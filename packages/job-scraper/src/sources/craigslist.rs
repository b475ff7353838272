//! Classified-site source (Craigslist).

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::{element_text, parse_base_url, resolve_listing_url, ListingSource};
use crate::config::SearchConfig;
use crate::error::{SourceError, SourceResult};
use crate::fetcher::Fetcher;
use crate::types::{JobRecord, SourceKind};

/// Classified posts rarely name the employer.
pub const CRAIGSLIST_COMPANY: &str = "Private Employer";
pub const CRAIGSLIST_JOB_TYPE: &str = "Seasonal/Temporary";
pub const CRAIGSLIST_DESCRIPTION: &str = "Job posting on Craigslist";

lazy_static! {
    // Posting pages end in a numeric id: /.../7712345678.html
    static ref POSTING_HREF: Regex = Regex::new(r"/\d+\.html$").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a[href]").unwrap();
}

/// Runs one category search on a regional classifieds site.
pub struct CraigslistSource {
    base_url: Url,
    category: String,
    query: String,
    location: String,
    cap: usize,
}

impl CraigslistSource {
    pub fn from_config(config: &SearchConfig) -> SourceResult<Self> {
        Ok(Self {
            base_url: parse_base_url(&config.craigslist.base_url)?,
            category: config.craigslist.category.clone(),
            query: config.craigslist.query.clone(),
            location: config.location.clone(),
            cap: config.craigslist.cap,
        })
    }

    /// `<base>/search/<category>?query=<query>`
    pub fn search_url(&self) -> SourceResult<Url> {
        let path = format!("/search/{}", self.category);
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|source| SourceError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })?;
        url.query_pairs_mut().append_pair("query", &self.query);
        Ok(url)
    }
}

#[async_trait]
impl ListingSource for CraigslistSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Craigslist
    }

    async fn collect(&self, fetcher: &dyn Fetcher) -> SourceResult<Vec<JobRecord>> {
        let url = self.search_url()?;

        let html = match fetcher.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Craigslist search failed");
                return Ok(Vec::new());
            }
        };

        let jobs = parse_listings(&html, &self.base_url, &self.location, self.cap);
        debug!(records = jobs.len(), "Craigslist search parsed");
        Ok(jobs)
    }
}

/// Extract posting links from one search results page.
///
/// Any anchor whose path ends in `/<digits>.html` and has text counts as a
/// posting. At most `cap` records are returned.
pub fn parse_listings(html: &str, base_url: &Url, location: &str, cap: usize) -> Vec<JobRecord> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            if !POSTING_HREF.is_match(href) {
                return None;
            }
            let title = element_text(a);
            if title.is_empty() {
                return None;
            }
            let url = resolve_listing_url(base_url, href)?;

            Some(
                JobRecord::new(SourceKind::Craigslist, title, url)
                    .with_company(CRAIGSLIST_COMPANY)
                    .with_location(location)
                    .with_job_type(CRAIGSLIST_JOB_TYPE)
                    .with_description(CRAIGSLIST_DESCRIPTION),
            )
        })
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{craigslist_page, MockFetcher};

    fn base() -> Url {
        Url::parse("https://redding.craigslist.org").unwrap()
    }

    #[test]
    fn test_parses_posting_links_only() {
        let html = craigslist_page(&[
            ("/lab/d/redding-warehouse-help/7712345678.html", "Warehouse help"),
            ("/search/jjj?sort=date", "newest"),
            ("https://redding.craigslist.org/sls/d/redding-holiday-sales/7712345679.html", "Holiday sales"),
            ("/about/help", "help"),
        ]);

        let jobs = parse_listings(&html, &base(), "Redding, CA", 15);

        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].url,
            "https://redding.craigslist.org/lab/d/redding-warehouse-help/7712345678.html"
        );
        assert_eq!(jobs[0].title, "Warehouse help");
        assert_eq!(jobs[0].company, CRAIGSLIST_COMPANY);
        assert_eq!(jobs[0].job_type, CRAIGSLIST_JOB_TYPE);
        assert_eq!(jobs[0].source, SourceKind::Craigslist);
        assert_eq!(jobs[1].title, "Holiday sales");
    }

    #[test]
    fn test_skips_untitled_links() {
        let html = craigslist_page(&[("/lab/d/x/1.html", "   "), ("/lab/d/y/2.html", "Picker")]);

        let jobs = parse_listings(&html, &base(), "Redding, CA", 15);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Picker");
    }

    #[test]
    fn test_respects_cap() {
        let links: Vec<(String, String)> = (0..40)
            .map(|i| (format!("/lab/d/job/{}.html", 1000 + i), format!("Job {}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = links.iter().map(|(h, t)| (h.as_str(), t.as_str())).collect();

        let jobs = parse_listings(&craigslist_page(&refs), &base(), "Redding, CA", 15);

        assert_eq!(jobs.len(), 15);
    }

    #[test]
    fn test_search_url() {
        let source = CraigslistSource::from_config(&SearchConfig::default()).unwrap();

        let url = source.search_url().unwrap();

        assert_eq!(
            url.as_str(),
            "https://redding.craigslist.org/search/jjj?query=seasonal+temporary+part-time"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list() {
        let source = CraigslistSource::from_config(&SearchConfig::default()).unwrap();
        let fetcher = MockFetcher::new().with_status("https://redding.craigslist.org", 503);

        let jobs = source.collect(&fetcher).await.unwrap();

        assert!(jobs.is_empty());
        assert_eq!(fetcher.call_count(), 1);
    }
}
