//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end with the reqwest fetcher and scraper extractor.

use ripple_crawl::config::Config;
use ripple_crawl::crawler::{crawl, CrawlEngine};
use ripple_crawl::{CrawlError, CrawlState};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given limit
fn create_test_config(limit: usize) -> Config {
    let mut config = Config::default();
    config.crawler.limit = limit;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    // Large enough that false positives do not disturb exact counts
    config.filter.bits = 1 << 16;
    config
}

fn html_page(links: &[String]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

/// Answers the seed reachability probe
async fn mount_head_ok(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn requests_matching(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .count()
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /", 1).await;

    // Probed with HEAD, so the body is downloaded only once
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    for page in ["/page1", "/page2"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html_page(&[format!("{}/", base_url)]))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let report = crawl(&create_test_config(100), &format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.fetched, 3);
    assert_eq!(
        report.fetched_urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
}

#[tokio::test]
async fn test_limit_exactness() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /", 1).await;

    let links: Vec<String> = (0..150).map(|i| format!("{}/p{}", base_url, i)).collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&links))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/p\d+$"))
        .respond_with(html_page(&links))
        .mount(&mock_server)
        .await;

    let report = crawl(&create_test_config(10), &format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.state, CrawlState::Stopped);
    assert_eq!(report.fetched, 10);
    assert_eq!(report.fetched_urls.len(), 10);
    assert_eq!(requests_matching(&mock_server, "/p").await, 9);
}

#[tokio::test]
async fn test_limit_exactness_with_workers() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /", 1).await;

    let links: Vec<String> = (0..40).map(|i| format!("{}/p{}", base_url, i)).collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&links))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/p\d+$"))
        .respond_with(html_page(&links))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(15);
    config.crawler.workers = 4;

    let report = crawl(&config, &format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetched, 15);
    assert_eq!(requests_matching(&mock_server, "/p").await, 14);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    // Fetched once even though several candidates on this host are checked
    mount_robots(&mock_server, "User-agent: *\nDisallow: /admin", 1).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            format!("{}/allowed", base_url),
            format!("{}/admin", base_url),
            format!("{}/admin/", base_url),
        ]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/allowed"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Should never be called
    Mock::given(method("GET"))
        .and(path_regex(r"^/admin"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut engine = CrawlEngine::from_config(&create_test_config(100)).unwrap();
    let report = engine
        .run(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetched, 2);
    assert_eq!(engine.gate().disallowed_paths(&base_url), vec!["admin"]);
    // Wiremock verifies the expectations when mock_server drops
}

#[tokio::test]
async fn test_unavailable_robots_fails_closed() {
    let seed_server = MockServer::start().await;
    let broken_server = MockServer::start().await;

    mount_head_ok(&seed_server).await;
    mount_robots(&seed_server, "User-agent: *\nAllow: /", 1).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            format!("{}/one", broken_server.uri()),
            format!("{}/two", broken_server.uri()),
        ]))
        .mount(&seed_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&broken_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/(one|two)$"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&broken_server)
        .await;

    let report = crawl(&create_test_config(100), &format!("{}/", seed_server.uri()))
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetched, 1);
}

#[tokio::test]
async fn test_relative_links_and_extension_filter() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /", 1).await;

    Mock::given(method("GET"))
        .and(path("/a/"))
        .respond_with(html_page(&[
            "/b.html".to_string(),
            "files/archive.zip".to_string(),
            "setup.MSI".to_string(),
        ]))
        .mount(&mock_server)
        .await;

    // Trailing slash on the page URL: the link's leading slash is dropped
    Mock::given(method("GET"))
        .and(path("/a/b.html"))
        .respond_with(html_page(&["c.html".to_string()]))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No trailing slash: plain concatenation onto the page URL
    Mock::given(method("GET"))
        .and(path("/a/b.htmlc.html"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"(?i)\.(zip|msi)$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawl(&create_test_config(100), &format!("{}/a/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetched, 3);
}

#[tokio::test]
async fn test_broken_links_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head_ok(&mock_server).await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /", 1).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            format!("{}/missing", base_url),
            format!("{}/present", base_url),
        ]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/present"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&create_test_config(100), &format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.fetched, 2);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_invalid_seed_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut engine = CrawlEngine::from_config(&create_test_config(100)).unwrap();
    let result = engine.run(&format!("{}/", mock_server.uri())).await;

    assert!(matches!(result, Err(CrawlError::SeedInvalid { .. })));
    assert_eq!(engine.state(), CrawlState::Aborted);
}
