use serde::Deserialize;

/// Main configuration structure for Ripple-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched in one run
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum number of page fetches in flight at once
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Link suffixes that are never followed (compared lowercase)
    #[serde(rename = "skip-extensions", default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            workers: default_workers(),
            request_timeout_secs: default_timeout(),
            skip_extensions: default_skip_extensions(),
        }
    }
}

/// Duplicate filter sizing
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Size of the bit array
    #[serde(default = "default_bits")]
    pub bits: usize,

    /// Number of hash functions
    #[serde(default = "default_hashes")]
    pub hashes: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            hashes: default_hashes(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the token matched against robots.txt groups
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            )
        }
    }
}

fn default_limit() -> usize {
    100
}

fn default_workers() -> usize {
    1
}

fn default_timeout() -> u64 {
    30
}

fn default_skip_extensions() -> Vec<String> {
    vec![".msi".to_string(), ".bz2".to_string(), ".zip".to_string()]
}

fn default_bits() -> usize {
    512
}

fn default_hashes() -> usize {
    3
}

fn default_crawler_name() -> String {
    "ripple-crawl".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
