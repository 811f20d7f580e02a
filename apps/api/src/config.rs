use std::time::Duration;

use anyhow::{Context, Result};

use crate::search::models::SearchConfig;
use crate::search::pipeline::DiscoveryOptions;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: String,
    pub search_api_key: String,
    pub search_engine_id: String,
    pub port: u16,
    pub rust_log: String,
    /// Sequential pacing between search page fetches.
    pub search_page_delay_ms: u64,
    /// How long a generated query preview stays confirmable.
    pub draft_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            search_api_key: require_env("GOOGLE_CUSTOM_SEARCH_API_KEY")?,
            search_engine_id: require_env("GOOGLE_CUSTOM_SEARCH_ID")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            search_page_delay_ms: parse_env("SEARCH_PAGE_DELAY_MS", 0)
                .context("SEARCH_PAGE_DELAY_MS must be a whole number of milliseconds")?,
            draft_ttl_secs: parse_env("DRAFT_TTL_SECS", 3600)
                .context("DRAFT_TTL_SECS must be a whole number of seconds")?,
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            api_key: self.search_api_key.clone(),
            search_engine_id: self.search_engine_id.clone(),
        }
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            page_delay: Duration::from_millis(self.search_page_delay_ms),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
