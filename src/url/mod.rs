//! URL handling module for Ripple-Crawl
//!
//! This module splits absolute URLs into host and path, resolves links found
//! on a page against that page's URL, and filters out links to binary
//! downloads.

mod extension;
mod host;
mod resolve;

pub use extension::ExtensionFilter;
pub use host::{extract_host, HostPath};
pub use resolve::{is_absolute, resolve};
