//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing the discovered URLs as a sorted, newline-separated list
//! - Summarizing a run for the operator

mod report;
mod writer;

pub use report::{print_report, CrawlReport, FailedSitemap};
pub use writer::{render_url_list, write_url_list};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
