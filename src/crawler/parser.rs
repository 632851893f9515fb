//! HTML link extraction
//!
//! Links are returned as raw `href` values; resolving them against the page
//! URL is the crawl engine's job.

use scraper::{Html, Selector};

/// Pulls candidate links out of a fetched page body
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, body: &str) -> Vec<String>;
}

/// scraper-backed extractor for `<a href>` links
///
/// # Link Extraction Rules
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Empty hrefs
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter(|element| element.value().attr("download").is_none())
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .filter(|href| is_followable(href))
            .map(str::to_string)
            .collect()
    }
}

fn is_followable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lowered = href.to_ascii_lowercase();
    !(lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str) -> Vec<String> {
        HtmlLinkExtractor.extract_links(html)
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_relative_links_stay_raw() {
        let html = r#"<html><body><a href="/other">A</a><a href="next.html">B</a></body></html>"#;
        assert_eq!(links(html), vec!["/other", "next.html"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Top</a><a href="/x">X</a></body></html>"#;
        assert_eq!(links(html), vec!["/x"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <a href="javascript:void(0)">J</a>
            <a href="mailto:test@example.com">M</a>
            <a href="tel:+1234567890">T</a>
            <a href="data:text/html,<h1>Test</h1>">D</a>
            <a href="JavaScript:alert(1)">J2</a>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_hrefs_are_trimmed() {
        let html = r#"<a href="  /spaced  ">S</a>"#;
        assert_eq!(links(html), vec!["/spaced"]);
    }

    #[test]
    fn test_binary_links_are_still_extracted() {
        // Extension filtering happens in the engine
        let html = r#"<a href="/archive.zip">Z</a>"#;
        assert_eq!(links(html), vec!["/archive.zip"]);
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html>
            <body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="mailto:test@example.com">Invalid</a>
                <a href="/another-valid">Valid</a>
            </body>
            </html>
        "#;
        assert_eq!(links(html).len(), 2);
    }
}
