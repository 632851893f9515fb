use crate::url::host::strip_scheme;
use crate::url::extract_host;
use crate::Result;

/// Returns true if the reference already carries an `http` or `https` scheme,
/// in any letter case
pub fn is_absolute(reference: &str) -> bool {
    strip_scheme(reference).is_some()
}

/// Resolves a link found on `current_url` into an absolute URL
///
/// Absolute references are validated and returned unchanged. Anything else is
/// joined textually onto `current_url`: when the current URL ends with `/` the
/// reference's own leading `/` is dropped, otherwise the two are concatenated
/// as-is. There is no dot-segment, query or fragment handling, so
/// `("http://ex.com/a", "b.html")` yields `http://ex.com/ab.html`.
///
/// # Errors
///
/// Returns `CrawlError::MalformedUrl` when the result has no valid
/// `http(s)://authority` prefix.
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::resolve;
///
/// assert_eq!(resolve("http://ex.com/a/", "/b.html").unwrap(), "http://ex.com/a/b.html");
/// assert_eq!(resolve("http://ex.com/a", "b.html").unwrap(), "http://ex.com/ab.html");
/// ```
pub fn resolve(current_url: &str, reference: &str) -> Result<String> {
    let resolved = if is_absolute(reference) {
        reference.to_string()
    } else if current_url.ends_with('/') {
        let tail = reference.strip_prefix('/').unwrap_or(reference);
        format!("{}{}", current_url, tail)
    } else {
        format!("{}{}", current_url, reference)
    };

    extract_host(&resolved)?;
    Ok(resolved)
}
