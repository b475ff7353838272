//! Listing-site source (Indeed).

use async_trait::async_trait;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::{element_text, parse_base_url, resolve_listing_url, ListingSource};
use crate::config::SearchConfig;
use crate::error::{SourceError, SourceResult};
use crate::fetcher::Fetcher;
use crate::types::{JobRecord, SourceKind};

pub const INDEED_JOB_TYPE: &str = "Seasonal";

/// Searches the listing site once per active keyword.
pub struct IndeedSource {
    base_url: Url,
    location: String,
    keywords: Vec<String>,
    job_type_filter: String,
    per_keyword_cap: usize,
}

impl IndeedSource {
    pub fn from_config(config: &SearchConfig) -> SourceResult<Self> {
        Ok(Self {
            base_url: parse_base_url(&config.indeed.base_url)?,
            location: config.location.clone(),
            keywords: config.active_keywords().map(|k| k.to_string()).collect(),
            job_type_filter: config.indeed.job_type.clone(),
            per_keyword_cap: config.indeed.per_keyword_cap,
        })
    }

    /// `<base>/jobs?q=<keyword>&l=<location>&jt=<type>`
    pub fn search_url(&self, keyword: &str) -> SourceResult<Url> {
        let mut url = self
            .base_url
            .join("/jobs")
            .map_err(|source| SourceError::InvalidUrl {
                url: self.base_url.to_string(),
                source,
            })?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("l", &self.location)
            .append_pair("jt", &self.job_type_filter);
        Ok(url)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[async_trait]
impl ListingSource for IndeedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Indeed
    }

    async fn collect(&self, fetcher: &dyn Fetcher) -> SourceResult<Vec<JobRecord>> {
        let mut jobs = Vec::new();

        for keyword in &self.keywords {
            let url = self.search_url(keyword)?;

            let html = match fetcher.fetch(url.as_str()).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(keyword = %keyword, error = %e, "Indeed keyword search failed");
                    continue;
                }
            };

            let found = parse_listings(
                &html,
                &self.base_url,
                keyword,
                &self.location,
                self.per_keyword_cap,
            );
            debug!(keyword = %keyword, records = found.len(), "Indeed keyword parsed");
            jobs.extend(found);
        }

        Ok(jobs)
    }
}

lazy_static! {
    static ref CARD: Selector = Selector::parse("div.job_seen_beacon").unwrap();
    static ref CARD_LINK: Selector = Selector::parse("a[href]").unwrap();
    static ref COMPANY: Selector = Selector::parse("span.company").unwrap();
    static ref COMPANY_FALLBACK: Selector =
        Selector::parse(r#"[data-testid="company-name"]"#).unwrap();
}

/// Extract listing cards from one search results page.
///
/// A card contributes a record only if it has a titled link and a company
/// name. At most `cap` records are returned.
pub fn parse_listings(
    html: &str,
    base_url: &Url,
    keyword: &str,
    location: &str,
    cap: usize,
) -> Vec<JobRecord> {
    let document = Html::parse_document(html);

    document
        .select(&CARD)
        .filter_map(|card| {
            let (href, title) = card.select(&CARD_LINK).find_map(|a| {
                let title = element_text(a);
                let href = a.value().attr("href")?;
                (!title.is_empty()).then(|| (href.to_string(), title))
            })?;

            let company = card
                .select(&COMPANY)
                .chain(card.select(&COMPANY_FALLBACK))
                .map(element_text)
                .find(|c| !c.is_empty())?;

            let url = resolve_listing_url(base_url, &href)?;

            Some(
                JobRecord::new(SourceKind::Indeed, title, url)
                    .with_company(company)
                    .with_location(location)
                    .with_job_type(INDEED_JOB_TYPE)
                    .with_description(format!("{} job on Indeed", keyword)),
            )
        })
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{indeed_card, indeed_page, MockFetcher};
    use crate::types::SALARY_NOT_SPECIFIED;

    fn base() -> Url {
        Url::parse("https://www.indeed.com").unwrap()
    }

    #[test]
    fn test_parses_cards_and_resolves_relative_links() {
        let html = indeed_page(&[
            indeed_card("/rc/clk?jk=1", "Seasonal Stocker", "Target"),
            indeed_card("https://www.indeed.com/viewjob?jk=2", "Warehouse Associate", "Amazon"),
        ]);

        let jobs = parse_listings(&html, &base(), "seasonal", "Redding, CA", 20);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Seasonal Stocker");
        assert_eq!(jobs[0].company, "Target");
        assert_eq!(jobs[0].url, "https://www.indeed.com/rc/clk?jk=1");
        assert_eq!(jobs[0].source, SourceKind::Indeed);
        assert_eq!(jobs[0].job_type, "Seasonal");
        assert_eq!(jobs[0].location, "Redding, CA");
        assert_eq!(jobs[0].salary, SALARY_NOT_SPECIFIED);
        assert_eq!(jobs[0].description, "seasonal job on Indeed");
        assert_eq!(jobs[1].url, "https://www.indeed.com/viewjob?jk=2");
    }

    #[test]
    fn test_skips_cards_missing_company_or_title() {
        let html = indeed_page(&[
            r#"<div class="job_seen_beacon"><a href="/rc/clk?jk=1">No Company</a></div>"#.to_string(),
            r#"<div class="job_seen_beacon"><a href="/rc/clk?jk=2"></a><span class="company">Acme</span></div>"#.to_string(),
            indeed_card("/rc/clk?jk=3", "Kept", "Costco"),
        ]);

        let jobs = parse_listings(&html, &base(), "seasonal", "Redding, CA", 20);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
    }

    #[test]
    fn test_company_fallback_selector() {
        let html = indeed_page(&[
            r#"<div class="job_seen_beacon"><h2><a href="/rc/clk?jk=9"><span>Cashier</span></a></h2><span data-testid="company-name">Lowe's</span></div>"#.to_string(),
        ]);

        let jobs = parse_listings(&html, &base(), "retail", "Redding, CA", 20);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Lowe's");
    }

    #[test]
    fn test_respects_per_keyword_cap() {
        let cards: Vec<String> = (0..30)
            .map(|i| indeed_card(&format!("/rc/clk?jk={}", i), &format!("Job {}", i), "Acme"))
            .collect();
        let html = indeed_page(&cards);

        let jobs = parse_listings(&html, &base(), "seasonal", "Redding, CA", 20);

        assert_eq!(jobs.len(), 20);
        assert_eq!(jobs[19].title, "Job 19");
    }

    #[test]
    fn test_unrecognized_markup_yields_nothing() {
        let jobs = parse_listings("<html><body><p>Captcha</p></body></html>", &base(), "x", "y", 20);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_search_url_encodes_parameters() {
        let source = IndeedSource::from_config(&SearchConfig::default()).unwrap();

        let url = source.search_url("part-time").unwrap();

        assert_eq!(url.host_str(), Some("www.indeed.com"));
        assert_eq!(url.path(), "/jobs");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "part-time".to_string()),
                ("l".to_string(), "Redding, CA".to_string()),
                ("jt".to_string(), "seasonal".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_queries_only_active_keywords_and_survives_one_failure() {
        let source = IndeedSource::from_config(&SearchConfig::default()).unwrap();
        let fetcher = MockFetcher::new()
            .failing("https://www.indeed.com/jobs?q=seasonal")
            .with_body(
                "https://www.indeed.com/jobs?q=temporary",
                &indeed_page(&[indeed_card("/rc/clk?jk=7", "Temp Loader", "UPS")]),
            );

        let jobs = source.collect(&fetcher).await.unwrap();

        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].description, "temporary job on Indeed");
    }
}
