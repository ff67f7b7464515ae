//! Run report for a finished or interrupted crawl

use std::time::Duration;

/// A sitemap that could not be fetched or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSitemap {
    /// The sitemap URL
    pub url: String,

    /// Why it was skipped
    pub reason: String,
}

/// Summary statistics for one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Sitemaps taken off the queue in this run (including failed ones)
    pub sitemaps_processed: u64,

    /// Sitemaps skipped because of a fetch or parse failure
    pub failed: Vec<FailedSitemap>,

    /// Unique page URLs known at the end of the run
    pub urls_found: usize,

    /// Sitemaps still queued at the end of the run
    pub sitemaps_remaining: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Creates a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped sitemap
    pub fn record_failure(&mut self, url: impl Into<String>, reason: impl Into<String>) {
        self.failed.push(FailedSitemap {
            url: url.into(),
            reason: reason.into(),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Sitemaps processed per second over the run
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.sitemaps_processed as f64 / secs
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(outcome: &str, report: &CrawlReport) {
    println!("=== Sitemap Sweep: {} ===\n", outcome);
    println!("  Sitemaps processed: {}", report.sitemaps_processed);
    println!("  Sitemaps failed: {}", report.failure_count());
    println!("  Sitemaps still queued: {}", report.sitemaps_remaining);
    println!("  URLs found: {}", report.urls_found);
    println!(
        "  Elapsed: {:.2}s ({:.2} sitemaps/sec)",
        report.elapsed.as_secs_f64(),
        report.rate()
    );

    if !report.failed.is_empty() {
        println!("\nFailed sitemaps:");
        for failure in &report.failed {
            println!("  - {}: {}", failure.url, failure.reason);
        }
    }
}
