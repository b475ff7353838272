//! Test support: a canned-response fetcher and markup fixtures.
//!
//! # Example
//!
//! ```rust
//! use job_scraper::testing::{indeed_card, indeed_page, MockFetcher};
//!
//! let fetcher = MockFetcher::new()
//!     .with_body(
//!         "https://www.indeed.com/jobs",
//!         &indeed_page(&[indeed_card("/rc/clk?jk=1", "Stocker", "Target")]),
//!     )
//!     .failing("https://redding.craigslist.org");
//! ```

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::Fetcher;
use crate::types::{JobRecord, SourceKind};

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status(u16),
    TransportFailure,
    Hang,
}

/// Fetcher returning canned responses keyed by URL prefix.
///
/// The first registered prefix that matches wins. Unmatched URLs answer
/// 404. Every requested URL is recorded.
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<Vec<(String, MockResponse)>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, prefix: &str, response: MockResponse) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((prefix.to_string(), response));
        self
    }

    /// Answer URLs starting with `prefix` with `body`.
    pub fn with_body(self, prefix: &str, body: &str) -> Self {
        self.push(prefix, MockResponse::Body(body.to_string()))
    }

    /// Answer URLs starting with `prefix` with a non-success status.
    pub fn with_status(self, prefix: &str, status: u16) -> Self {
        self.push(prefix, MockResponse::Status(status))
    }

    /// Fail URLs starting with `prefix` at the transport level.
    pub fn failing(self, prefix: &str) -> Self {
        self.push(prefix, MockResponse::TransportFailure)
    }

    /// Never answer URLs starting with `prefix`.
    pub fn hanging(self, prefix: &str) -> Self {
        self.push(prefix, MockResponse::Hang)
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Number of requests whose URL starts with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        let response = self
            .responses
            .read()
            .unwrap()
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
            Some(MockResponse::TransportFailure) => Err(FetchError::Transport {
                url: url.to_string(),
                source: "connection refused".into(),
            }),
            Some(MockResponse::Hang) => {
                std::future::pending::<()>().await;
                Err(FetchError::Timeout {
                    url: url.to_string(),
                })
            }
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A minimal record for pipeline tests.
pub fn record(url: &str, source: SourceKind, description: &str) -> JobRecord {
    JobRecord::new(source, format!("{} listing", source), url).with_description(description)
}

/// One listing card as served by the listing site.
pub fn indeed_card(href: &str, title: &str, company: &str) -> String {
    format!(
        r#"<div class="job_seen_beacon"><table><tr><td>
<h2 class="jobTitle"><a class="jcs-JobTitle" href="{href}"><span title="{title}">{title}</span></a></h2>
<div class="company_location"><span class="company">{company}</span><div class="companyLocation">Redding, CA</div></div>
</td></tr></table></div>"#
    )
}

/// A search results page wrapping `cards`.
pub fn indeed_page(cards: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Seasonal Jobs</title></head><body><div id=\"mosaic-jobcards\">{}</div></body></html>",
        cards.join("\n")
    )
}

/// A classifieds search page with one anchor per `(href, text)`.
pub fn craigslist_page(links: &[(&str, &str)]) -> String {
    let items: Vec<String> = links
        .iter()
        .map(|(href, text)| format!(r#"<li class="cl-static-search-result"><a href="{href}"><div class="title">{text}</div></a></li>"#))
        .collect();
    format!(
        "<html><body><ol class=\"cl-static-search-results\">{}</ol></body></html>",
        items.join("\n")
    )
}
