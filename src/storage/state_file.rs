//! JSON state file used for resuming interrupted crawls

use crate::persist::write_atomically;
use crate::state::CrawlState;
use crate::storage::{Snapshot, StateError, StateResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The state file of one crawl
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the snapshot and rebuilds the crawl state
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlState)` - The saved progress
    /// * `Err(StateError::NotFound)` - No state file at this path
    /// * `Err(StateError::Corrupt)` - Not JSON, a field is missing, or a field has the wrong shape
    /// * `Err(StateError::Io)` - The file exists but could not be read
    pub fn load(&self) -> StateResult<CrawlState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StateError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StateError::Corrupt {
                    path: self.path.clone(),
                    reason: "file is not valid UTF-8".to_string(),
                })
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| StateError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(snapshot.into_state())
    }

    /// Atomically writes the state, replacing any previous snapshot
    pub fn save(&self, state: &CrawlState) -> StateResult<()> {
        let json = serde_json::to_vec_pretty(&Snapshot::capture(state))?;
        write_atomically(&self.path, &json).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Saved state to {} ({} queued, {} found)",
            self.path.display(),
            state.pending().queue_len(),
            state.found_count()
        );
        Ok(())
    }

    /// Removes the state file; a missing file is not an error
    pub fn delete(&self) -> StateResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StateError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
