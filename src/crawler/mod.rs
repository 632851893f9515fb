//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML link extraction behind the `LinkExtractor` seam
//! - The bounded breadth-first frontier
//! - Overall crawl coordination

mod engine;
mod fetcher;
mod frontier;
mod parser;

pub use engine::{crawl, CrawlEngine, CrawlReport};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::{HtmlLinkExtractor, LinkExtractor};
