//! Ripple-Crawl: a polite breadth-first web crawler
//!
//! Starting from a seed URL, this crate discovers and fetches linked pages up to
//! a bounded count. Every candidate passes through a probabilistic duplicate
//! filter and a per-host politeness gate that honours robots.txt.

pub mod config;
pub mod crawler;
pub mod filter;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed URL: {url}")]
    MalformedUrl { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("robots.txt unavailable for {host}: {source}")]
    RobotsUnavailable {
        host: String,
        #[source]
        source: Box<CrawlError>,
    },

    #[error("Seed URL is not reachable: {url}")]
    SeedInvalid { url: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl CrawlError {
    /// Returns true for failures of the fetch transport itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlReport};
pub use filter::DuplicateFilter;
pub use robots::{PolicyDecision, PolitenessGate};
pub use state::CrawlState;
pub use crate::url::{extract_host, resolve, HostPath};
