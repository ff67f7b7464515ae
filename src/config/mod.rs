//! Configuration module for Sitemap-Sweep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and turning it into the immutable run parameters the
//! engine works with.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_sweep::config::{load_config, ProcessorConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! let run = ProcessorConfig::from_config(&config, "https://example.com/sitemap.xml", "urls.txt")
//!     .unwrap();
//! println!("State will be kept in {}", run.state_path.display());
//! ```

mod parser;
mod processor;
mod types;
mod validation;

// Re-export types
pub use processor::{default_state_path, ProcessorConfig};
pub use types::{
    Config, CrawlerConfig, UserAgentConfig, DEFAULT_REQUEST_INTERVAL_MS, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate_email;
