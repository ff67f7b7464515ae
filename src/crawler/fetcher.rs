//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Spacing consecutive requests by the configured interval
//! - Error classification

use crate::config::ProcessorConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Errors that can occur while fetching a sitemap
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timed out for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_connect() {
            Self::Connect { url, source }
        } else {
            Self::Request { url, source }
        }
    }
}

/// Source of sitemap documents
///
/// The engine calls `fetch` at most once per queued sitemap and never
/// concurrently.
#[async_trait]
pub trait SitemapFetcher: Send + Sync {
    /// Retrieves the raw body of `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitemap_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(
///     "SitemapSweep/0.1.0 (+webmaster@example.org)",
///     Duration::from_secs(30),
/// )
/// .unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Enforces a minimum delay between consecutive requests
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until `interval` has passed since the previous request started
    ///
    /// The first call returns immediately.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Fetches sitemaps over HTTP(S), one throttled GET per call
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    throttle: Throttle,
}

impl HttpFetcher {
    /// Creates a fetcher using the user agent, timeout and request interval of `config`
    pub fn new(config: &ProcessorConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            throttle: Throttle::new(config.request_interval),
        })
    }
}

#[async_trait]
impl SitemapFetcher for HttpFetcher {
    /// Fetches a sitemap
    ///
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Non-2xx status (after redirects) | `HttpStatus` |
    /// | Request or body timeout | `Timeout` |
    /// | Connection refused, DNS, TLS | `Connect` |
    /// | Other request failure | `Request` |
    /// | Body read failure | `Body` |
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.throttle.wait().await;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("TestBot/1.0 (+test@example.com)", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_fetcher_from_config() {
        let config = ProcessorConfig::new("https://example.com/sitemap.xml", "urls.txt").unwrap();
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[test]
    fn test_http_status_message() {
        let err = FetchError::HttpStatus {
            url: "https://example.com/sitemap.xml".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP 503 for https://example.com/sitemap.xml");
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_first_call_does_not_wait() {
        let throttle = Throttle::new(Duration::from_secs(2));
        let start = Instant::now();
        throttle.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_spaces_requests() {
        let throttle = Throttle::new(Duration::from_secs(2));
        let start = Instant::now();

        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(2));

        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_does_not_wait_after_idle_period() {
        let throttle = Throttle::new(Duration::from_secs(2));
        throttle.wait().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        let before = Instant::now();
        throttle.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            throttle.wait().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
