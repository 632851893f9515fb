//! Per-host robots.txt cache entry
//!
//! Each host gets one entry for the lifetime of a crawl run. The robots.txt
//! outcome is resolved at most once, even when several workers ask at the same
//! time, and paths found to be disallowed are remembered so later lookups can
//! be answered without consulting the rules again.

use crate::robots::ParsedRobots;
use crate::CrawlError;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// Outcome of resolving a host's robots.txt
///
/// A failure is kept as `CrawlError::RobotsUnavailable` wrapping the fetch
/// error, shared by every later lookup on the host.
pub type RobotsOutcome = std::result::Result<ParsedRobots, Arc<CrawlError>>;

/// Cached robots.txt state for one host
#[derive(Debug, Default)]
pub struct HostPolicy {
    robots: OnceCell<RobotsOutcome>,
    disallowed: Mutex<Vec<String>>,
}

impl HostPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the host's robots outcome, running `fetch` only on first access
    ///
    /// Concurrent callers wait for the first fetch instead of starting their own.
    pub async fn robots<F, Fut>(&self, fetch: F) -> &RobotsOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RobotsOutcome>,
    {
        self.robots.get_or_init(fetch).await
    }

    /// Returns true once the robots outcome has been resolved
    pub fn is_resolved(&self) -> bool {
        self.robots.initialized()
    }

    /// Returns true if `path` contains any path already found to be disallowed
    ///
    /// The host root's empty path is never used as a pattern; it would match
    /// every path on the host.
    pub fn is_known_disallowed(&self, path: &str) -> bool {
        let disallowed = self.disallowed.lock().unwrap_or_else(PoisonError::into_inner);
        disallowed
            .iter()
            .any(|pattern| !pattern.is_empty() && path.contains(pattern.as_str()))
    }

    /// Records a disallowed path
    pub fn remember_disallowed(&self, path: &str) {
        let mut disallowed = self.disallowed.lock().unwrap_or_else(PoisonError::into_inner);
        if !disallowed.iter().any(|p| p == path) {
            disallowed.push(path.to_string());
        }
    }

    /// Paths recorded as disallowed so far
    pub fn disallowed_paths(&self) -> Vec<String> {
        self.disallowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
