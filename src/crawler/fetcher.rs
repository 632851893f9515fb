//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the crawler's user agent and timeout
//! - GET requests for page bodies
//! - The one-off reachability probe (HEAD, then GET) for the seed URL
//! - robots.txt retrieval, with the status code mapped to a policy
//! - Error classification

use crate::config::Config;
use crate::robots::{ParsedRobots, RobotsSource};
use crate::{CrawlError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fetch transport used by the crawl engine
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url`
    ///
    /// # Errors
    ///
    /// Returns a transport error (`Transport`, `Timeout` or `HttpStatus`) when
    /// the page could not be retrieved; the engine skips the URL.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Returns true if `url` answers with a successful response
    async fn is_reachable(&self, url: &str) -> bool {
        self.fetch(url).await.is_ok()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent and timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> std::result::Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher for pages and robots.txt
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::HttpClient` if the client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }

    /// HEAD probe; servers that refuse HEAD are asked again with GET
    async fn is_reachable(&self, url: &str) -> bool {
        let status = match self.client.head(url).send().await {
            Ok(response) => response.status(),
            Err(e) => {
                tracing::debug!(url, error = %e, "reachability probe failed");
                return false;
            }
        };

        if status != StatusCode::METHOD_NOT_ALLOWED && status != StatusCode::NOT_IMPLEMENTED {
            return status.is_success();
        }

        tracing::debug!(url, %status, "HEAD refused, probing with GET");
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "reachability probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl RobotsSource for HttpFetcher {
    /// Fetches `host/robots.txt`
    ///
    /// | Response | Policy |
    /// |----------|--------|
    /// | 2xx | Parse body |
    /// | 401, 403 | Disallow everything |
    /// | Other 4xx | Allow everything |
    /// | 5xx, other status | Error (host denied) |
    /// | Network error, timeout | Error (host denied) |
    async fn fetch_robots(&self, host: &str) -> Result<ParsedRobots> {
        let url = format!("{}/robots.txt", host);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_error(&url, e))?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.map_err(|e| classify_error(&url, e))?;
            return Ok(ParsedRobots::from_content(&body));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(ParsedRobots::disallow_all());
        }

        if status.is_client_error() {
            return Ok(ParsedRobots::allow_all());
        }

        Err(CrawlError::HttpStatus {
            url,
            status: status.as_u16(),
        })
    }
}

/// Maps a reqwest error onto the crawler's transport errors
fn classify_error(url: &str, e: reqwest::Error) -> CrawlError {
    if e.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        CrawlError::Transport {
            url: url.to_string(),
            message: format!("connection failed: {}", e),
        }
    } else {
        CrawlError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
