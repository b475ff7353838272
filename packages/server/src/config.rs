use anyhow::{Context, Result};
use dotenvy::dotenv;
use job_scraper::{SearchConfig, DEFAULT_AGGREGATION_DEADLINE, DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Where `search` was loaded from, if not the built-in defaults
    pub search_config_path: Option<String>,
    pub search: SearchConfig,
    pub fetch_timeout: Duration,
    pub request_deadline: Duration,
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let search_config_path = lookup("SEARCH_CONFIG_PATH").filter(|p| !p.trim().is_empty());

        let search = match &search_config_path {
            Some(path) => SearchConfig::from_file(path)
                .with_context(|| format!("Failed to load search config from {}", path))?,
            None => SearchConfig::default(),
        };

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            search_config_path,
            search,
            fetch_timeout: secs(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT)?,
            request_deadline: secs(&lookup, "REQUEST_DEADLINE_SECS", DEFAULT_AGGREGATION_DEADLINE)?,
            user_agent: lookup("SCRAPER_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Result<Duration> {
    match lookup(key) {
        Some(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", key))?;
            anyhow::ensure!(secs > 0, "{} must be greater than zero", key);
            Ok(Duration::from_secs(secs))
        }
        None => Ok(default),
    }
}
