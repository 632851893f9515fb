//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Validating the seed URL
//! - Draining the frontier breadth-first with a bounded number of fetches in flight
//! - Checking each URL against the politeness gate
//! - Resolving, filtering and enqueueing discovered links
//! - Stopping at the fetch limit

use crate::config::{validate, Config};
use crate::crawler::frontier::Frontier;
use crate::crawler::{HtmlLinkExtractor, HttpFetcher, LinkExtractor, PageFetcher};
use crate::filter::DuplicateFilter;
use crate::robots::{PolicyDecision, PolitenessGate, RobotsSource};
use crate::state::CrawlState;
use crate::url::{resolve, ExtensionFilter};
use crate::{CrawlError, Result};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Summary of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Terminal state of the run
    pub state: CrawlState,

    /// Number of pages fetched successfully
    pub fetched: usize,

    /// Fetched URLs in completion order
    pub fetched_urls: Vec<String>,

    /// Dequeued URLs skipped by the politeness gate
    pub skipped: usize,

    /// Dequeued URLs whose fetch failed
    pub failed: usize,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// What happened to one dequeued URL
#[derive(Debug)]
enum Visit {
    Fetched { url: String, pushed: usize },
    Skipped,
    Failed,
}

/// Main crawl engine
///
/// Owns all per-run state (duplicate filter, robots cache) so independent
/// engines never share anything. An engine runs once.
pub struct CrawlEngine {
    gate: PolitenessGate,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    extensions: ExtensionFilter,
    limit: usize,
    workers: usize,
    state: CrawlState,
}

impl CrawlEngine {
    /// Creates an engine with injected collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - Limit, worker count, skip extensions, filter sizing and agent name
    /// * `fetcher` - Page transport and seed probe
    /// * `robots` - robots.txt source
    /// * `extractor` - Link extraction from page bodies
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        robots: Arc<dyn RobotsSource>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        let gate = PolitenessGate::new(
            DuplicateFilter::from(&config.filter),
            robots,
            config.user_agent.crawler_name.clone(),
        );

        Self {
            gate,
            fetcher,
            extractor,
            extensions: ExtensionFilter::new(&config.crawler.skip_extensions),
            limit: config.crawler.limit,
            workers: config.crawler.workers.max(1),
            state: CrawlState::Idle,
        }
    }

    /// Creates an engine backed by reqwest and scraper
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` if the configuration fails validation and
    /// `CrawlError::HttpClient` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate(config)?;
        let http = Arc::new(HttpFetcher::new(config)?);
        Ok(Self::new(
            config,
            http.clone(),
            http,
            Arc::new(HtmlLinkExtractor),
        ))
    }

    /// Current run state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// The run's politeness gate
    pub fn gate(&self) -> &PolitenessGate {
        &self.gate
    }

    /// Crawls breadth-first from `seed`
    ///
    /// Per-URL failures (malformed links, transport errors, denied hosts) are
    /// logged and skipped; they never end the run.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Run finished as `Completed` or `Stopped`
    /// * `Err(CrawlError::SeedInvalid)` - Seed unreachable; the engine is `Aborted`
    /// * `Err(CrawlError::InvalidTransition)` - The engine already ran
    pub async fn run(&mut self, seed: &str) -> Result<CrawlReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        if self.state != CrawlState::Idle {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to: CrawlState::Running,
            });
        }

        if !self.fetcher.is_reachable(seed).await {
            self.transition(CrawlState::Aborted)?;
            tracing::error!(seed, "seed URL is not reachable, aborting");
            return Err(CrawlError::SeedInvalid {
                url: seed.to_string(),
            });
        }

        self.transition(CrawlState::Running)?;
        tracing::info!("Crawling from {} (limit {})", seed, self.limit);
        tracing::debug!(
            bits = self.gate.filter().size(),
            hashes = self.gate.filter().hashes(),
            workers = self.workers,
            "duplicate filter ready"
        );

        let frontier = Frontier::new(self.limit);
        match self.gate.is_allowed(seed).await {
            Ok(PolicyDecision::Allowed) => {
                frontier.try_push(seed.to_string());
            }
            Ok(decision) => tracing::warn!("Seed {} {}", seed, decision),
            Err(e) => tracing::warn!(error = %e, "Seed {} rejected", seed),
        }

        let tally = self.drain(&frontier).await;

        let state = if frontier.limit_reached() {
            CrawlState::Stopped
        } else {
            CrawlState::Completed
        };
        self.transition(state)?;

        let report = CrawlReport {
            state,
            fetched: frontier.fetched(),
            fetched_urls: tally.fetched_urls,
            skipped: tally.skipped,
            failed: tally.failed,
            started_at,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Crawl {}: {} pages fetched, {} skipped, {} failed in {:?}",
            report.state,
            report.fetched,
            report.skipped,
            report.failed,
            report.elapsed
        );

        Ok(report)
    }

    /// Runs visits until the frontier is empty or the limit is covered
    async fn drain(&self, frontier: &Frontier) -> Tally {
        let mut tally = Tally::default();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < self.workers {
                match frontier.next() {
                    Some(url) => in_flight.push(self.visit(frontier, url)),
                    None => break,
                }
            }

            match in_flight.next().await {
                Some(visit) => tally.record(visit),
                None => break,
            }
        }

        tally
    }

    /// Processes one dequeued URL: politeness, fetch, link discovery
    ///
    /// The URL already cleared the full gate when it was queued, so only the
    /// host's cached rules are consulted here, never the path memo.
    async fn visit(&self, frontier: &Frontier, url: String) -> Visit {
        match self.gate.check_rules(&url).await {
            Ok(PolicyDecision::Allowed) => {}
            Ok(decision) => {
                frontier.release();
                tracing::info!("Skipping {}: {}", url, decision);
                return Visit::Skipped;
            }
            Err(e) => {
                frontier.release();
                tracing::info!(error = %e, "Skipping {}", url);
                return Visit::Skipped;
            }
        }

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                frontier.release();
                tracing::warn!(error = %e, "Failed to fetch {}", url);
                return Visit::Failed;
            }
        };

        let count = frontier.record_fetch();
        tracing::info!("Fetched : {} ({}/{})", url, count, frontier.limit());
        tracing::debug!(
            queued = frontier.queued(),
            in_flight = frontier.in_flight(),
            "frontier after fetch"
        );

        let pushed = self.enqueue_links(frontier, &url, &body).await;
        Visit::Fetched { url, pushed }
    }

    /// Resolves and gates the links on a page, queueing those allowed
    ///
    /// Stops at the first allowed link that no longer fits under the limit.
    async fn enqueue_links(&self, frontier: &Frontier, page_url: &str, body: &str) -> usize {
        let mut pushed = 0;

        for href in self.extractor.extract_links(body) {
            if self.extensions.is_skipped(&href) {
                tracing::debug!("Skipping binary link {}", href);
                continue;
            }

            let candidate = match resolve(page_url, &href) {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::debug!(error = %e, "dropping link {}", href);
                    continue;
                }
            };

            match self.gate.is_allowed(&candidate).await {
                Ok(PolicyDecision::Allowed) => {
                    if !frontier.try_push(candidate.clone()) {
                        tracing::debug!("Limit reached, ignoring remaining links on {}", page_url);
                        break;
                    }
                    tracing::info!("Pushing {} to the queue", candidate);
                    pushed += 1;
                }
                Ok(decision) => tracing::debug!("Not queueing {}: {}", candidate, decision),
                Err(e) => tracing::debug!(error = %e, "Not queueing {}", candidate),
            }
        }

        pushed
    }

    fn transition(&mut self, to: CrawlState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!("Crawl state {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Tally {
    fetched_urls: Vec<String>,
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, visit: Visit) {
        match visit {
            Visit::Fetched { url, pushed } => {
                tracing::debug!(pushed, "finished {}", url);
                self.fetched_urls.push(url);
            }
            Visit::Skipped => self.skipped += 1,
            Visit::Failed => self.failed += 1,
        }
    }
}

/// Runs a complete crawl with the production HTTP and HTML collaborators
///
/// # Example
///
/// ```no_run
/// use ripple_crawl::config::Config;
/// use ripple_crawl::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl(&Config::default(), "https://example.com/").await?;
/// println!("Fetched {} links", report.fetched);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, seed: &str) -> Result<CrawlReport> {
    let mut engine = CrawlEngine::from_config(config)?;
    engine.run(seed).await
}
