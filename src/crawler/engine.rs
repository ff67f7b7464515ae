//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! a run, including:
//! - Establishing fresh or resumed state
//! - Draining the sitemap queue one throttled fetch at a time
//! - Expanding sitemap indexes and collecting page URLs
//! - Handling interrupts and the URL limit
//! - Persisting the snapshot and writing the final output

use crate::config::ProcessorConfig;
use crate::crawler::fetcher::{HttpFetcher, SitemapFetcher};
use crate::crawler::interrupt::InterruptHandler;
use crate::crawler::parser::{parse_sitemap, SitemapDocument};
use crate::exit_code;
use crate::output::{write_url_list, CrawlReport};
use crate::state::{CrawlPhase, CrawlState};
use crate::storage::{StateError, StateFile};
use crate::{Result, SitemapError};
use std::time::Instant;
use url::Url;

/// A progress line is logged after this many processed sitemaps
const PROGRESS_INTERVAL: u64 = 10;

/// How a run ended
#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    /// Queue drained; output written, state file removed
    Completed(CrawlReport),

    /// URL limit hit; output written, state file removed
    LimitReached(CrawlReport),

    /// Interruption requested; state saved, output not written
    Interrupted(CrawlReport),
}

impl CrawlOutcome {
    pub fn report(&self) -> &CrawlReport {
        match self {
            Self::Completed(report) | Self::LimitReached(report) | Self::Interrupted(report) => {
                report
            }
        }
    }

    pub fn into_report(self) -> CrawlReport {
        match self {
            Self::Completed(report) | Self::LimitReached(report) | Self::Interrupted(report) => {
                report
            }
        }
    }

    /// The terminal phase this outcome corresponds to
    pub fn phase(&self) -> CrawlPhase {
        match self {
            Self::Completed(_) => CrawlPhase::Completed,
            Self::LimitReached(_) => CrawlPhase::LimitReached,
            Self::Interrupted(_) => CrawlPhase::Interrupted,
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Completed(_) | Self::LimitReached(_) => exit_code::SUCCESS,
            Self::Interrupted(_) => exit_code::INTERRUPTED,
        }
    }
}

/// Crawl engine structure
///
/// Owns the run parameters, the fetcher, the state file and the crawl
/// state for the duration of one run.
pub struct Engine<F = HttpFetcher> {
    config: ProcessorConfig,
    fetcher: F,
    store: StateFile,
    interrupt: Option<InterruptHandler>,
}

impl Engine<HttpFetcher> {
    /// Creates an engine fetching over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The run parameters
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Parameters are valid and the HTTP client was built
    /// * `Err(SitemapError)` - Invalid parameters or client construction failure
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: SitemapFetcher> Engine<F> {
    /// Creates an engine using a custom fetcher
    pub fn with_fetcher(config: ProcessorConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        let store = StateFile::new(&config.state_path);
        Ok(Self {
            config,
            fetcher,
            store,
            interrupt: None,
        })
    }

    /// Uses `handler` instead of installing process signal listeners
    pub fn with_interrupt_handler(mut self, handler: InterruptHandler) -> Self {
        self.interrupt = Some(handler);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Runs the crawl to one of its terminal phases
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Completed, limit reached, or interrupted with state saved
    /// * `Err(SitemapError)` - Corrupt state on resume, or the state/output could not be persisted
    pub async fn run(mut self) -> Result<CrawlOutcome> {
        let result = self.execute().await;
        match &result {
            Ok(outcome) => log_phase(outcome.phase()),
            Err(_) => log_phase(CrawlPhase::Failed),
        }
        result
    }

    async fn execute(&mut self) -> Result<CrawlOutcome> {
        let started = Instant::now();

        let mut interrupt = match self.interrupt.take() {
            Some(handler) => handler,
            None => InterruptHandler::install().map_err(SitemapError::Signal)?,
        };

        log_phase(CrawlPhase::Init);
        let mut state = self.establish_state()?;
        log_phase(CrawlPhase::Running);
        tracing::info!(
            "Crawling from {} ({} sitemaps queued, {} URLs already found)",
            self.config.root_url,
            state.pending().queue_len(),
            state.found_count()
        );

        let mut report = CrawlReport::new();
        let mut phase = self
            .crawl(&mut state, &mut interrupt, &mut report, started)
            .await;

        if phase.writes_output() && interrupt.is_interrupted() {
            phase = CrawlPhase::Interrupted;
        }

        report.urls_found = state.found_count();
        report.sitemaps_remaining = state.pending().queue_len();

        let outcome = match phase {
            CrawlPhase::Interrupted => {
                self.store.save(&state)?;
                tracing::warn!(
                    "Crawl interrupted; progress saved to {} ({} sitemaps queued). Rerun with --resume to continue.",
                    self.store.path().display(),
                    state.pending().queue_len()
                );
                report.elapsed = started.elapsed();
                CrawlOutcome::Interrupted(report)
            }
            CrawlPhase::LimitReached => {
                self.finish(&state)?;
                report.elapsed = started.elapsed();
                CrawlOutcome::LimitReached(report)
            }
            _ => {
                self.finish(&state)?;
                report.elapsed = started.elapsed();
                CrawlOutcome::Completed(report)
            }
        };

        Ok(outcome)
    }

    /// Loads the resumed state or seeds a fresh one
    fn establish_state(&self) -> Result<CrawlState> {
        let root = self.config.root_url.as_str();

        if !self.config.resume {
            if self.store.exists() {
                tracing::warn!(
                    "State file {} exists and will be overwritten; pass --resume to continue that crawl",
                    self.store.path().display()
                );
            }
            return Ok(CrawlState::fresh(root));
        }

        match self.store.load() {
            Ok(mut state) => {
                if state.pending().is_empty() && state.pending().seen_len() == 0 {
                    state.pending_mut().enqueue_if_new(root);
                }
                tracing::info!(
                    "Resumed from {}: {} sitemaps queued, {} seen, {} URLs found",
                    self.store.path().display(),
                    state.pending().queue_len(),
                    state.pending().seen_len(),
                    state.found_count()
                );
                Ok(state)
            }
            Err(StateError::NotFound { path }) => {
                tracing::warn!(
                    "No state file at {}; starting a fresh crawl",
                    path.display()
                );
                Ok(CrawlState::fresh(root))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Main loop: one iteration per queued sitemap
    async fn crawl(
        &self,
        state: &mut CrawlState,
        interrupt: &mut InterruptHandler,
        report: &mut CrawlReport,
        started: Instant,
    ) -> CrawlPhase {
        loop {
            if interrupt.is_interrupted() {
                return CrawlPhase::Interrupted;
            }

            if state.limit_reached(self.config.limit) {
                let dropped = state.pending_mut().clear_queue();
                tracing::info!(
                    "URL limit reached with {} URLs; dropped {} queued sitemaps",
                    state.found_count(),
                    dropped
                );
                return CrawlPhase::LimitReached;
            }

            let Some(url) = state.pending().front().map(str::to_string) else {
                return CrawlPhase::Completed;
            };

            let fetched = tokio::select! {
                biased;
                _ = interrupt.interrupted() => return CrawlPhase::Interrupted,
                result = self.fetcher.fetch(&url) => result,
            };
            state.pending_mut().pop_front();
            report.sitemaps_processed += 1;

            match fetched {
                Ok(body) => self.process_document(state, &url, &body, report),
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}. Skipping.", url, e);
                    report.record_failure(&url, e.to_string());
                }
            }

            if report.sitemaps_processed % PROGRESS_INTERVAL == 0 {
                report.elapsed = started.elapsed();
                tracing::info!(
                    "Progress: {} sitemaps processed, {} queued, {} URLs found ({:.2} sitemaps/sec)",
                    report.sitemaps_processed,
                    state.pending().queue_len(),
                    state.found_count(),
                    report.rate()
                );
            }
        }
    }

    /// Parses a fetched sitemap and merges its entries into the state
    fn process_document(
        &self,
        state: &mut CrawlState,
        url: &str,
        body: &[u8],
        report: &mut CrawlReport,
    ) {
        let base_url = match Url::parse(url) {
            Ok(base_url) => base_url,
            Err(e) => {
                tracing::warn!("Invalid sitemap URL {}: {}. Skipping.", url, e);
                report.record_failure(url, format!("invalid URL: {}", e));
                return;
            }
        };

        match parse_sitemap(body, &base_url) {
            Ok(SitemapDocument::Index { sitemaps }) => {
                let listed = sitemaps.len();
                let mut queued = 0;
                for child in sitemaps {
                    if state.pending_mut().enqueue_if_new(child) {
                        queued += 1;
                    }
                }
                tracing::debug!(
                    "Sitemap index {}: {} children, {} new",
                    url,
                    listed,
                    queued
                );
            }
            Ok(SitemapDocument::UrlSet { pages }) => {
                let listed = pages.len();
                let mut added = 0;
                for page in pages {
                    if state.limit_reached(self.config.limit) {
                        tracing::debug!("URL limit reached; discarding the rest of {}", url);
                        break;
                    }
                    if state.add_found(page) {
                        added += 1;
                    }
                }
                tracing::debug!("URL set {}: {} entries, {} new", url, listed, added);
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}. Skipping.", url, e);
                report.record_failure(url, e.to_string());
            }
        }
    }

    /// Saves the snapshot, writes the output, then removes the snapshot
    ///
    /// If the output cannot be written the snapshot stays on disk.
    fn finish(&self, state: &CrawlState) -> Result<()> {
        self.store.save(state)?;
        write_url_list(&self.config.output_path, state.found_urls())?;

        if let Err(e) = self.store.delete() {
            tracing::warn!("Output written but the state file could not be removed: {}", e);
        }
        Ok(())
    }
}

fn log_phase(phase: CrawlPhase) {
    tracing::debug!("Crawl phase: {}", phase);
}
