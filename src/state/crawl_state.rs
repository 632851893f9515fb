use std::fmt;

/// Run state of the crawl engine
///
/// A run moves `Idle → Running → {Completed, Stopped}`, or straight from
/// `Idle` to `Aborted` when the seed URL is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Engine built, nothing crawled yet
    Idle,

    /// Frontier is being drained
    Running,

    // ===== Terminal States =====
    /// Frontier ran dry before the limit was reached
    Completed,

    /// Fetch limit reached; remaining frontier entries were abandoned
    Stopped,

    /// Seed URL failed the reachability probe; nothing was crawled
    Aborted,
}

impl CrawlState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped | Self::Aborted)
    }

    /// Checks whether moving from this state to `to` is legal
    pub fn can_transition_to(&self, to: CrawlState) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Aborted)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Stopped)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
