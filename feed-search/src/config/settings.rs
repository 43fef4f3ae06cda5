//! Settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use feed_search_repository::opensearch::DEFAULT_INDEX_NAME;

use crate::FeedSearchError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default number of results per page.
const DEFAULT_PER_PAGE: u64 = 10;

/// Default base URL result links are built from.
const DEFAULT_BASE_URL: &str = "http://localhost:3000/posts";

/// Default time to wait for the search engine at startup.
const DEFAULT_READINESS_DELAY_MS: u64 = 10_000;

/// Default interval between readiness health checks.
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Settings for the feed search facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Search engine URL.
    pub opensearch_url: String,
    /// Name of the posts index.
    pub index_name: String,
    /// Results per page when the caller does not say.
    pub per_page: u64,
    /// Base URL for result links; a result's url is `{base_url}/{id}`.
    pub base_url: String,
    /// How long startup waits for the engine before giving up.
    pub readiness_delay: Duration,
    /// Interval between health checks while waiting.
    pub poll_interval: Duration,
    /// Use the in-memory engine instead of OpenSearch.
    pub mock: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            per_page: DEFAULT_PER_PAGE,
            base_url: DEFAULT_BASE_URL.to_string(),
            readiness_delay: Duration::from_millis(DEFAULT_READINESS_DELAY_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            mock: false,
        }
    }
}

impl SearchSettings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX`: index name (default: posts)
    /// - `SEARCH_PER_PAGE`: default results per page (default: 10)
    /// - `SEARCH_BASE_URL`: base URL for result links (default: http://localhost:3000/posts)
    /// - `SEARCH_READINESS_DELAY_MS`: startup wait in milliseconds (default: 10000)
    /// - `SEARCH_POLL_INTERVAL_MS`: health check interval in milliseconds (default: 500)
    /// - `SEARCH_MOCK`: use the in-memory engine (default: false)
    pub fn from_env() -> Result<Self, FeedSearchError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from any key/value source. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FeedSearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            opensearch_url: lookup("OPENSEARCH_URL").unwrap_or(defaults.opensearch_url),
            index_name: lookup("SEARCH_INDEX").unwrap_or(defaults.index_name),
            per_page: parse_var(&lookup, "SEARCH_PER_PAGE")?.unwrap_or(defaults.per_page),
            base_url: lookup("SEARCH_BASE_URL").unwrap_or(defaults.base_url),
            readiness_delay: parse_var(&lookup, "SEARCH_READINESS_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.readiness_delay),
            poll_interval: parse_var(&lookup, "SEARCH_POLL_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            mock: parse_flag(&lookup, "SEARCH_MOCK")?.unwrap_or(defaults.mock),
        })
    }

    /// Use the in-memory engine.
    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// Set the readiness timeout.
    pub fn with_readiness_delay(mut self, delay: Duration) -> Self {
        self.readiness_delay = delay;
        self
    }

    /// Set the base URL for result links.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, FeedSearchError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| FeedSearchError::config(format!("Invalid {}={}: {}", key, raw, e)))
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>, FeedSearchError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(FeedSearchError::config(format!(
                "Invalid {}={}: expected true or false",
                key, raw
            ))),
        })
        .transpose()
}
