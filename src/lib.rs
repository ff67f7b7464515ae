//! Sitemap-Sweep: a resumable sitemap crawler
//!
//! This crate discovers every page URL reachable from a root XML sitemap by
//! following sitemap indexes, throttling requests against the origin, and
//! persisting progress so an interrupted crawl can pick up where it left off.

pub mod config;
pub mod crawler;
pub mod output;
mod persist;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Sitemap-Sweep operations
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State file error: {0}")]
    State(#[from] storage::StateError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sitemap-Sweep operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Process exit statuses a supervising process can branch on
pub mod exit_code {
    /// Crawl completed (or hit its URL limit) and the output was written
    pub const SUCCESS: u8 = 0;

    /// Configuration, state or output failure; nothing to resume from
    /// unless a state file was left behind
    pub const FAILURE: u8 = 1;

    /// Interrupted by a signal; progress was saved, rerun with `--resume`
    pub const INTERRUPTED: u8 = 130;
}

// Re-export commonly used types
pub use config::{Config, ProcessorConfig};
pub use crawler::{CrawlOutcome, Engine};
pub use output::CrawlReport;
pub use state::{CrawlState, PendingSitemaps};
pub use storage::StateFile;
