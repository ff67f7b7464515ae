use serde::Deserialize;

/// Default minimum delay between two requests (milliseconds)
pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 2000;

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure, as read from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Minimum time between two consecutive requests (milliseconds)
    #[serde(rename = "request-interval-ms")]
    pub request_interval_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of unique page URLs to collect
    pub limit: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_interval_ms: DEFAULT_REQUEST_INTERVAL_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            limit: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Email address site operators can reach us at
    #[serde(rename = "contact-email")]
    pub contact_email: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SitemapSweep".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_email: "contact@example.com".to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// contact URL part omitted when none is configured.
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!(
                "{}/{} (+{}; {})",
                self.crawler_name, self.crawler_version, url, self.contact_email
            ),
            None => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_email
            ),
        }
    }
}
