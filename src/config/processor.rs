//! Run parameters handed to the crawl engine

use crate::config::types::Config;
use crate::config::validation::validate_processor_config;
use crate::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Immutable parameters for a single crawl run
///
/// Built once by the front end (CLI flags layered over the file config),
/// validated, then owned by the [`Engine`](crate::crawler::Engine) for the
/// duration of the run.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Root sitemap URL the crawl starts from
    pub root_url: Url,

    /// Where the sorted URL list is written on success
    pub output_path: PathBuf,

    /// Where progress snapshots are kept
    pub state_path: PathBuf,

    /// Maximum number of unique page URLs to collect
    pub limit: Option<usize>,

    /// Minimum delay between two consecutive requests
    pub request_interval: Duration,

    /// Per-request timeout
    pub timeout: Duration,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Continue from the state file instead of starting at the root
    pub resume: bool,
}

impl ProcessorConfig {
    /// Creates run parameters with defaults taken from [`Config::default`]
    ///
    /// # Arguments
    ///
    /// * `root_url` - The root sitemap URL
    /// * `output_path` - The file the discovered URLs are written to
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessorConfig)` - Parameters with the state path derived from the output path
    /// * `Err(ConfigError)` - The root URL could not be parsed
    pub fn new(root_url: &str, output_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_config(&Config::default(), root_url, output_path)
    }

    /// Creates run parameters from a loaded file configuration
    pub fn from_config(
        config: &Config,
        root_url: &str,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let root_url = Url::parse(root_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", root_url, e)))?;
        let output_path = output_path.into();
        let state_path = default_state_path(&output_path);

        Ok(Self {
            root_url,
            output_path,
            state_path,
            limit: config.crawler.limit,
            request_interval: Duration::from_millis(config.crawler.request_interval_ms),
            timeout: Duration::from_secs(config.crawler.timeout_secs),
            user_agent: config.user_agent.header_value(),
            resume: false,
        })
    }

    pub fn with_state_path(mut self, state_path: impl Into<PathBuf>) -> Self {
        self.state_path = state_path.into();
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Checks the parameters before a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_processor_config(self)
    }
}

/// Derives the state file path from the output path (`<output>.state.json`)
pub fn default_state_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".state.json");
    PathBuf::from(name)
}
