//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of a crawl run (idle, running, and the terminal outcomes)

mod crawl_state;

pub use crawl_state::CrawlState;
