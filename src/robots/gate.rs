//! Politeness gate
//!
//! Decides whether a URL may be fetched: first against the duplicate filter,
//! then against the host's robots.txt. Robots documents are fetched once per
//! host and run, and disallowed paths are memoized per host so repeat lookups
//! never touch the rules again.

use crate::filter::DuplicateFilter;
use crate::robots::{HostPolicy, RobotsSource};
use crate::url::{extract_host, HostPath};
use crate::{CrawlError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Why a URL was denied
#[derive(Debug, Clone)]
pub enum DenyReason {
    /// The path matched one already found disallowed for this host
    KnownDisallowed,
    /// The host's robots.txt disallows the URL for our agent
    RobotsDisallowed,
    /// The host's robots.txt could not be retrieved; treated as a denial.
    /// Holds `CrawlError::RobotsUnavailable` with the fetch error as its source.
    RobotsUnavailable(Arc<CrawlError>),
}

impl PartialEq for DenyReason {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KnownDisallowed, Self::KnownDisallowed) => true,
            (Self::RobotsDisallowed, Self::RobotsDisallowed) => true,
            (Self::RobotsUnavailable(a), Self::RobotsUnavailable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for DenyReason {}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnownDisallowed => write!(f, "path previously disallowed by robots.txt"),
            Self::RobotsDisallowed => write!(f, "disallowed by robots.txt"),
            Self::RobotsUnavailable(error) => write!(f, "{}", error),
        }
    }
}

/// Outcome of a politeness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allowed,
    Denied(DenyReason),
    AlreadyVisited,
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Denied(reason) => write!(f, "not permitted: {}", reason),
            Self::AlreadyVisited => write!(f, "already visited"),
        }
    }
}

/// Stable cache key for a host: the hex SHA-256 of the host string
pub fn host_key(host: &str) -> String {
    hex::encode(Sha256::digest(host.as_bytes()))
}

/// Per-run politeness gate shared by all crawl workers
pub struct PolitenessGate {
    filter: DuplicateFilter,
    source: Arc<dyn RobotsSource>,
    user_agent: String,
    hosts: Mutex<HashMap<String, Arc<HostPolicy>>>,
}

impl PolitenessGate {
    /// Creates a gate
    ///
    /// # Arguments
    ///
    /// * `filter` - Duplicate filter for this run
    /// * `source` - Where robots.txt documents come from
    /// * `user_agent` - Token matched against robots.txt user-agent groups
    pub fn new(
        filter: DuplicateFilter,
        source: Arc<dyn RobotsSource>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            filter,
            source,
            user_agent: user_agent.into(),
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// The run's duplicate filter
    pub fn filter(&self) -> &DuplicateFilter {
        &self.filter
    }

    /// Full check for a newly discovered URL
    ///
    /// Records the URL in the duplicate filter; a URL seen before is reported
    /// as `AlreadyVisited` without looking at robots.txt.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::MalformedUrl` if the URL has no host.
    pub async fn is_allowed(&self, url: &str) -> Result<PolicyDecision> {
        if self.filter.test_and_add(url) {
            return Ok(PolicyDecision::AlreadyVisited);
        }
        self.check_robots(url).await
    }

    /// Robots.txt check only, leaving the duplicate filter untouched
    ///
    /// Answers from the disallowed-path memo when it matches, otherwise from
    /// the host's rules.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::MalformedUrl` if the URL has no host.
    pub async fn check_robots(&self, url: &str) -> Result<PolicyDecision> {
        let HostPath { host, path } = extract_host(url)?;
        let policy = self.host_policy(&host_key(&host));

        if policy.is_known_disallowed(&path) {
            tracing::debug!(url, "path already known to be disallowed");
            return Ok(PolicyDecision::Denied(DenyReason::KnownDisallowed));
        }

        self.evaluate_rules(&policy, url, &host, &path).await
    }

    /// Checks `url` against the host's robots.txt rules, ignoring the memo
    ///
    /// Used for URLs that already passed the full gate; the memo's substring
    /// match is broader than the rules and could reverse that decision.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::MalformedUrl` if the URL has no host.
    pub async fn check_rules(&self, url: &str) -> Result<PolicyDecision> {
        let HostPath { host, path } = extract_host(url)?;
        let policy = self.host_policy(&host_key(&host));
        self.evaluate_rules(&policy, url, &host, &path).await
    }

    async fn evaluate_rules(
        &self,
        policy: &HostPolicy,
        url: &str,
        host: &str,
        path: &str,
    ) -> Result<PolicyDecision> {
        let outcome = policy
            .robots(|| async {
                tracing::debug!(host, "fetching robots.txt");
                self.source.fetch_robots(host).await.map_err(|e| {
                    tracing::warn!(error = %e, "robots.txt unavailable for {}, denying host", host);
                    Arc::new(CrawlError::RobotsUnavailable {
                        host: host.to_string(),
                        source: Box::new(e),
                    })
                })
            })
            .await;

        let robots = match outcome {
            Ok(robots) => robots,
            Err(error) => {
                return Ok(PolicyDecision::Denied(DenyReason::RobotsUnavailable(
                    Arc::clone(error),
                )));
            }
        };

        if robots.is_allowed(url, &self.user_agent) {
            Ok(PolicyDecision::Allowed)
        } else {
            policy.remember_disallowed(path);
            Ok(PolicyDecision::Denied(DenyReason::RobotsDisallowed))
        }
    }

    /// Paths memoized as disallowed for a host (e.g. `http://example.com`)
    pub fn disallowed_paths(&self, host: &str) -> Vec<String> {
        let hosts = self.hosts.lock().unwrap_or_else(PoisonError::into_inner);
        hosts
            .get(&host_key(host))
            .map(|policy| policy.disallowed_paths())
            .unwrap_or_default()
    }

    /// Number of hosts whose robots.txt has been consulted
    pub fn known_hosts(&self) -> usize {
        let hosts = self.hosts.lock().unwrap_or_else(PoisonError::into_inner);
        hosts.values().filter(|policy| policy.is_resolved()).count()
    }

    fn host_policy(&self, key: &str) -> Arc<HostPolicy> {
        let mut hosts = self.hosts.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(hosts.entry(key.to_string()).or_default())
    }
}
