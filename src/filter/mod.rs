//! Duplicate detection for crawled URLs

mod bloom;

pub use bloom::DuplicateFilter;

use crate::config::FilterConfig;

impl From<&FilterConfig> for DuplicateFilter {
    fn from(config: &FilterConfig) -> Self {
        DuplicateFilter::new(config.bits, config.hashes)
    }
}
