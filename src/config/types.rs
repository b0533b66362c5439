use crate::crawler::{MAX_BACKOFF, MAX_TRIES};
use serde::Deserialize;

/// Default site searched by the crawler
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawler: CrawlerSettings,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentSettings,
}

/// Fetch and retry behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerSettings {
    /// Site the search endpoint and result links are relative to
    pub base_url: String,

    /// Attempts per URL before the crawl is abandoned
    pub max_tries: u32,

    /// Ceiling on a single backoff wait, in backoff units
    pub max_backoff: f64,

    /// Length of one backoff unit (milliseconds)
    pub backoff_unit_ms: u64,

    /// Whole-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tries: MAX_TRIES,
            max_backoff: MAX_BACKOFF,
            backoff_unit_ms: 1000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentSettings {
    pub crawler_name: String,
    pub crawler_version: String,
    pub contact_url: String,
}

impl Default for UserAgentSettings {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl UserAgentSettings {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}
