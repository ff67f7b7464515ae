//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PendingSitemaps`: FIFO queue of sitemap URLs paired with the seen set
//! - `CrawlState`: pending sitemaps plus the page URLs found so far
//! - `CrawlPhase`: lifecycle phase of a run

mod crawl_state;
mod pending;
mod phase;

// Re-export main types
pub use crawl_state::CrawlState;
pub use pending::PendingSitemaps;
pub use phase::CrawlPhase;
