//! Robots.txt handling module
//!
//! This module provides the robots.txt matcher wrapper, the per-host policy
//! cache, and the politeness gate the crawler consults before fetching.

mod cache;
mod gate;
mod parser;

pub use cache::{HostPolicy, RobotsOutcome};
pub use gate::{host_key, DenyReason, PolicyDecision, PolitenessGate};
pub use parser::ParsedRobots;

use crate::Result;
use async_trait::async_trait;

/// Source of robots.txt documents
#[async_trait]
pub trait RobotsSource: Send + Sync {
    /// Fetches and parses `host + "/robots.txt"`
    ///
    /// # Arguments
    ///
    /// * `host` - Scheme and authority, e.g. `https://example.com`
    ///
    /// # Errors
    ///
    /// Any error means the host's policy is unknown; callers deny the host.
    async fn fetch_robots(&self, host: &str) -> Result<ParsedRobots>;
}
