/// Phase definitions for a crawl run
///
/// A run starts in `Init`, moves to `Running` once its state is established,
/// and ends in exactly one terminal phase.
use std::fmt;

/// Represents the lifecycle phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Interrupt handler installed, state being loaded or seeded
    Init,

    /// Main loop is processing sitemaps
    Running,

    // ===== Terminal States =====
    /// Queue drained; output written
    Completed,

    /// URL limit hit; remaining queue dropped, output written
    LimitReached,

    /// Signal received; state saved, output not written
    Interrupted,

    /// Unrecoverable setup error (e.g. corrupt state on resume)
    Failed,
}

impl CrawlPhase {
    /// Returns true if the run has ended
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Init | Self::Running)
    }

    /// Returns true if this phase hands the found URLs to the output writer
    pub fn writes_output(&self) -> bool {
        matches!(self, Self::Completed | Self::LimitReached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::LimitReached => "limit_reached",
            Self::Interrupted => "interrupted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
