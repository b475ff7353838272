//! Outbound fetching.
//!
//! Parsers never talk to the network directly; they receive a `Fetcher`
//! so tests can hand them canned markup.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - reqwest client with fixed headers and a per-fetch timeout
//! - `MockFetcher` (in [`crate::testing`]) - canned bodies for tests

mod http;

use async_trait::async_trait;

use crate::error::FetchResult;

pub use http::{HttpFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};

/// A single GET against an external source.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its body.
    ///
    /// Non-2xx statuses and transport failures are errors; callers treat
    /// any error as "this source has no data".
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Name of this fetcher implementation, for logs.
    fn name(&self) -> &str;
}
