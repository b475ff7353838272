// Seasonal Job Scraper - HTTP API
//
// Serves the scrape pipeline from the job-scraper crate over a single
// endpoint. Configuration is read once at startup and shared immutably.

pub mod config;
pub mod server;

pub use config::*;
