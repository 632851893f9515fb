use crate::{CrawlError, Result};
use url::Url;

/// An absolute URL split into its host prefix and the remainder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPath {
    /// Scheme plus authority, e.g. `https://example.com`
    pub host: String,

    /// Everything after the host and its separating `/`, or `"/"` when empty
    pub path: String,
}

/// Returns what follows a leading `http://` or `https://`, matched without
/// regard to ASCII case
pub(crate) fn strip_scheme(url: &str) -> Option<&str> {
    ["http://", "https://"].into_iter().find_map(|scheme| {
        url.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| &url[scheme.len()..])
    })
}

/// Splits an absolute URL into `(host, path)`
///
/// The host is the longest prefix of the form `http(s)://authority`. When the
/// URL is exactly the host, the path is `"/"`; otherwise the path is whatever
/// follows the host and the single `/` separating them, so it carries no
/// leading slash.
///
/// # Errors
///
/// Returns `CrawlError::MalformedUrl` when the URL does not start with a valid
/// `http://` or `https://` authority.
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::extract_host;
///
/// let split = extract_host("http://ex.com/a/b.html").unwrap();
/// assert_eq!(split.host, "http://ex.com");
/// assert_eq!(split.path, "a/b.html");
///
/// let split = extract_host("https://ex.com").unwrap();
/// assert_eq!(split.path, "/");
/// ```
pub fn extract_host(url: &str) -> Result<HostPath> {
    let malformed = || CrawlError::MalformedUrl {
        url: url.to_string(),
    };

    let rest = strip_scheme(url).ok_or_else(malformed)?;

    let authority_len = rest.find('/').unwrap_or(rest.len());
    if authority_len == 0 {
        return Err(malformed());
    }

    let host_len = url.len() - rest.len() + authority_len;
    let host = &url[..host_len];

    // The authority must parse on its own; this rejects spaces, bad ports and the like
    match Url::parse(host) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => {}
        _ => return Err(malformed()),
    }

    let path = if host_len == url.len() {
        "/".to_string()
    } else {
        url[host_len + 1..].to_string()
    };

    Ok(HostPath {
        host: host.to_string(),
        path,
    })
}
