//! Durable record of a crawl's progress
//!
//! The on-disk form is a JSON object with exactly three fields:
//!
//! ```json
//! {
//!   "sitemap_queue": ["https://example.com/child2.xml"],
//!   "processed_sitemaps": ["https://example.com/index.xml", "https://example.com/child1.xml"],
//!   "found_urls": ["https://example.com/a", "https://example.com/b"]
//! }
//! ```

use crate::state::{CrawlState, PendingSitemaps};
use serde::{Deserialize, Serialize};

/// Serialized form of [`CrawlState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pending sitemap URLs, in processing order
    #[serde(rename = "sitemap_queue")]
    pub queue: Vec<String>,

    /// Sitemap URLs already queued or processed
    #[serde(rename = "processed_sitemaps")]
    pub seen: Vec<String>,

    /// Page URLs discovered so far
    #[serde(rename = "found_urls")]
    pub found: Vec<String>,
}

impl Snapshot {
    /// Captures a state; set fields are sorted so snapshots diff cleanly
    pub fn capture(state: &CrawlState) -> Self {
        let queue = state.pending().queued().map(str::to_owned).collect();

        let mut seen: Vec<String> = state.pending().seen().map(str::to_owned).collect();
        seen.sort_unstable();

        let mut found: Vec<String> = state.found_urls().iter().cloned().collect();
        found.sort_unstable();

        Self { queue, seen, found }
    }

    /// Rebuilds the in-memory state
    pub fn into_state(self) -> CrawlState {
        let pending = PendingSitemaps::from_parts(self.queue, self.seen);
        CrawlState::from_parts(pending, self.found)
    }
}
