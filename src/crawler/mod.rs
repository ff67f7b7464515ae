//! Crawler module for sitemap fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Throttled HTTP fetching behind the `SitemapFetcher` trait
//! - Sitemap XML parsing into index or URL-set documents
//! - Signal-driven interruption
//! - Overall crawl coordination

mod engine;
mod fetcher;
mod interrupt;
mod parser;

pub use engine::{CrawlOutcome, Engine};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, SitemapFetcher, Throttle};
pub use interrupt::{InterruptHandler, InterruptTrigger};
pub use parser::{parse_sitemap, ParseError, SitemapDocument, SITEMAP_NAMESPACE};

use crate::config::ProcessorConfig;
use crate::SitemapError;

/// Runs a complete crawl operation over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the parameters and build the HTTP client
/// 2. Install the interrupt handler
/// 3. Load or seed the crawl state
/// 4. Fetch and parse sitemaps until the queue drains or the limit is hit
/// 5. Write the sorted URL list, or save progress when interrupted
///
/// # Arguments
///
/// * `config` - The run parameters
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - How the run ended, with its report
/// * `Err(SitemapError)` - Crawl failed
pub async fn crawl(config: ProcessorConfig) -> Result<CrawlOutcome, SitemapError> {
    Engine::new(config)?.run().await
}
