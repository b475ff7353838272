//! Source parsers.
//!
//! Each source turns one site's raw markup into `JobRecord`s. The
//! extraction rule of every source is a plain `raw text -> Vec<JobRecord>`
//! function, so when a site changes its markup only that function changes.
//!
//! These integrations are coupled to unversioned third-party markup and
//! are expected to break; a parse that matches nothing is not an error.

mod craigslist;
mod direct;
mod indeed;

use async_trait::async_trait;
use scraper::ElementRef;
use url::Url;

use crate::config::SearchConfig;
use crate::error::{SourceError, SourceResult};
use crate::fetcher::Fetcher;
use crate::types::{JobRecord, SourceKind};

pub use craigslist::CraigslistSource;
pub use direct::DirectSource;
pub use indeed::IndeedSource;

/// One family of listings (a site, or a list of employer pages).
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetch and extract every record this source can offer.
    ///
    /// Per-keyword and per-employer fetch failures are absorbed here and
    /// only reduce the result; an `Err` means the whole family failed.
    async fn collect(&self, fetcher: &dyn Fetcher) -> SourceResult<Vec<JobRecord>>;
}

/// Build the enabled sources, always in aggregation order.
pub fn build_sources(config: &SearchConfig) -> SourceResult<Vec<Box<dyn ListingSource>>> {
    let mut sources: Vec<Box<dyn ListingSource>> = Vec::new();

    for kind in SourceKind::ALL {
        if !config.is_enabled(kind) {
            continue;
        }
        let source: Box<dyn ListingSource> = match kind {
            SourceKind::Indeed => Box::new(IndeedSource::from_config(config)?),
            SourceKind::Craigslist => Box::new(CraigslistSource::from_config(config)?),
            SourceKind::Direct => Box::new(DirectSource::from_config(config)?),
        };
        sources.push(source);
    }

    Ok(sources)
}

/// Parse a configured base URL.
pub(crate) fn parse_base_url(raw: &str) -> SourceResult<Url> {
    Url::parse(raw).map_err(|source| SourceError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Resolve a scraped href against the site origin.
///
/// Returns `None` unless the result is an absolute http(s) URL.
pub fn resolve_listing_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

/// Text content of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
