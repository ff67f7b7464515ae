//! Storage module for persisting crawl progress
//!
//! This module handles the state file that makes a crawl resumable:
//! - Loading a snapshot when resuming
//! - Atomically saving snapshots on interruption and before output is written
//! - Removing the snapshot once the output is safely on disk

mod snapshot;
mod state_file;

pub use snapshot::Snapshot;
pub use state_file::StateFile;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during state file operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("State file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("State file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("IO error on state file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state file operations
pub type StateResult<T> = Result<T, StateError>;
