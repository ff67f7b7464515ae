//! Work queue of sitemap URLs paired with the seen set
//!
//! The queue and the seen set only change together, so a URL can never sit
//! in the queue without also being marked as seen.

use std::collections::{HashSet, VecDeque};

/// Sitemap URLs waiting to be processed, plus every sitemap URL ever queued
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSitemaps {
    queue: VecDeque<String>,
    seen: HashSet<String>,
}

impl PendingSitemaps {
    /// Creates an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structure holding only the root sitemap
    pub fn seeded(root: impl Into<String>) -> Self {
        let mut pending = Self::new();
        pending.enqueue_if_new(root);
        pending
    }

    /// Rebuilds the structure from persisted parts
    ///
    /// Queued URLs missing from `seen` are added to it, and repeated queue
    /// entries are collapsed to their first occurrence.
    pub fn from_parts(
        queue: impl IntoIterator<Item = String>,
        seen: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut seen: HashSet<String> = seen.into_iter().collect();
        let mut queued = HashSet::new();
        let mut rebuilt = VecDeque::new();

        for url in queue {
            if queued.insert(url.clone()) {
                seen.insert(url.clone());
                rebuilt.push_back(url);
            }
        }

        Self {
            queue: rebuilt,
            seen,
        }
    }

    /// Queues a sitemap URL unless it has been seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now queued and seen
    /// * `false` - The URL was already seen; nothing changed
    pub fn enqueue_if_new(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Returns the next sitemap URL without removing it
    pub fn front(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    /// Removes and returns the next sitemap URL (it stays seen)
    pub fn pop_front(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Drops every queued URL, returning how many were dropped
    pub fn clear_queue(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Queued URLs in processing order
    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Every sitemap URL seen so far, in no particular order
    pub fn seen(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }
}
