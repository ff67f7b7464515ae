use crate::state::PendingSitemaps;
use std::collections::HashSet;

/// In-memory progress of a crawl
///
/// Holds the pending sitemap queue with its seen set, and the page URLs
/// discovered so far. The engine is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlState {
    pending: PendingSitemaps,
    found: HashSet<String>,
}

impl CrawlState {
    /// Creates the state of a fresh run: only the root sitemap is queued
    pub fn fresh(root_url: impl Into<String>) -> Self {
        Self {
            pending: PendingSitemaps::seeded(root_url),
            found: HashSet::new(),
        }
    }

    /// Assembles a state from its parts (used when resuming)
    pub fn from_parts(pending: PendingSitemaps, found: impl IntoIterator<Item = String>) -> Self {
        Self {
            pending,
            found: found.into_iter().collect(),
        }
    }

    pub fn pending(&self) -> &PendingSitemaps {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingSitemaps {
        &mut self.pending
    }

    /// Records a discovered page URL; returns `false` if it was already known
    pub fn add_found(&mut self, url: impl Into<String>) -> bool {
        self.found.insert(url.into())
    }

    pub fn found_urls(&self) -> &HashSet<String> {
        &self.found
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// Whether the found set has reached `limit` (never true without a limit)
    pub fn limit_reached(&self, limit: Option<usize>) -> bool {
        limit.is_some_and(|limit| self.found.len() >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = CrawlState::fresh("https://example.com/sitemap.xml");
        assert_eq!(state.pending().queue_len(), 1);
        assert_eq!(state.found_count(), 0);
    }

    #[test]
    fn test_add_found_is_idempotent() {
        let mut state = CrawlState::default();
        assert!(state.add_found("https://example.com/page1"));
        assert!(!state.add_found("https://example.com/page1"));
        assert_eq!(state.found_count(), 1);
    }

    #[test]
    fn test_limit_reached() {
        let mut state = CrawlState::default();
        assert!(!state.limit_reached(None));
        assert!(!state.limit_reached(Some(2)));

        state.add_found("a");
        assert!(!state.limit_reached(Some(2)));
        state.add_found("b");
        assert!(state.limit_reached(Some(2)));
        assert!(!state.limit_reached(None));
    }
}
