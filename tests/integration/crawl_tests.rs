//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use docsweep::extract::{ExtractError, ExtractOptions, Extractor, PageRecord};
use docsweep::output::{render_structured, render_text};
use docsweep::{CrawlConfig, CrawlEngine, LinkOrder, ProgressCallback, SweepError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Absolute URL on the mock server
fn url(server: &MockServer, p: &str) -> String {
    format!("{}{}", server.uri(), p)
}

/// Creates a crawl configuration seeded at the server root, without throttling
fn config_for(server: &MockServer) -> CrawlConfig {
    CrawlConfig::new(url(server, "/")).with_rate_limit(0.0)
}

/// Builds a small documentation page linking to `links`
fn page(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>
        <main><h1>{}</h1><p>{}</p><ul>{}</ul></main>
        </body></html>"#,
        title, title, body, anchors
    )
}

/// Mounts a page that must be fetched exactly `times` times
async fn mount_page(server: &MockServer, p: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_page_without_expansion() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Welcome", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "Never fetched", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_pages(1).with_max_depth(0);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/")]);
    assert_eq!(result.pages.len(), 1);

    let record = result.pages.get(&url(&server, "/")).unwrap();
    assert_eq!(record.title, "Home");
    assert!(record.body.contains("Welcome"));
    assert_eq!(record.links, vec![url(&server, "/a")]);

    assert_eq!(engine.stats().pages_visited, 1);
    assert_eq!(engine.stats().successful_fetches, 1);
    assert_eq!(engine.stats().failed_fetches, 0);
}

#[tokio::test]
async fn test_max_pages_ceiling() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a", "/b", "/c", "/d"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 1).await;
    mount_page(&server, "/b", page("B", "b", &[]), 1).await;
    mount_page(&server, "/c", page("C", "c", &[]), 0).await;
    mount_page(&server, "/d", page("D", "d", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_pages(3).with_max_depth(2);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(
        result.visited,
        vec![url(&server, "/"), url(&server, "/a"), url(&server, "/b")]
    );
    assert!(result.visited.len() <= config.max_pages);
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "0", &["/l1"]), 1).await;
    mount_page(&server, "/l1", page("L1", "1", &["/l2"]), 1).await;
    mount_page(&server, "/l2", page("L2", "2", &["/l3"]), 1).await;
    mount_page(&server, "/l3", page("L3", "3", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_pages(10).with_max_depth(2);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(
        result.visited,
        vec![url(&server, "/"), url(&server, "/l1"), url(&server, "/l2")]
    );
}

#[tokio::test]
async fn test_not_found_counts_failure_and_continues() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/missing", "/ok"]), 1).await;
    mount_page(&server, "/ok", page("Ok", "fine", &[]), 1).await;
    // "/missing" is not mounted; wiremock answers 404

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/"), url(&server, "/ok")]);
    assert!(result.pages.get(&url(&server, "/missing")).is_none());
    assert_eq!(engine.stats().failed_fetches, 1);
    assert_eq!(engine.stats().successful_fetches, 2);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/",
        page("Home", "Index", &["/private/secret", "/public"]),
        1,
    )
    .await;
    mount_page(&server, "/private/secret", page("Secret", "s", &[]), 0).await;
    mount_page(&server, "/public", page("Public", "p", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/"), url(&server, "/public")]);
    assert_eq!(engine.stats().failed_fetches, 1);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", "Index", &["/private/secret"]), 1).await;
    mount_page(&server, "/private/secret", page("Secret", "s", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server)
        .with_max_depth(1)
        .with_respect_robots(false);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited.len(), 2);
    assert_eq!(engine.stats().failed_fetches, 0);
}

/// Mounts a robots.txt that keeps crawlers out of `/private/`
async fn mount_private_robots(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_disabling_robots_never_visits_fewer_pages() {
    let server = MockServer::start().await;
    mount_private_robots(&server, 1).await;
    mount_page(&server, "/", page("Home", "Index", &["/private/a", "/public"]), 2).await;
    mount_page(&server, "/private/a", page("Private", "p", &[]), 1).await;
    mount_page(&server, "/public", page("Public", "p", &[]), 2).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1);

    let on = engine
        .crawl(&config.clone().with_respect_robots(true), None)
        .await
        .unwrap();
    engine.reset();
    let off = engine
        .crawl(&config.with_respect_robots(false), None)
        .await
        .unwrap();

    assert_eq!(on.visited.len(), 2);
    assert_eq!(off.visited.len(), 3);
    assert!(off.visited.len() >= on.visited.len());
}

#[tokio::test]
async fn test_robots_server_error_fails_open() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", "Index", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/"), url(&server, "/a")]);
    assert_eq!(engine.stats().failed_fetches, 0);
}

#[tokio::test]
async fn test_rate_limit_spaces_fetches() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1).with_rate_limit(0.2);

    let start = Instant::now();
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_denied_url_does_not_restart_rate_clock() {
    let server = MockServer::start().await;
    mount_private_robots(&server, 1).await;
    mount_page(&server, "/", page("Home", "Index", &["/private/a", "/public"]), 1).await;
    mount_page(&server, "/private/a", page("Private", "p", &[]), 0).await;
    mount_page(&server, "/public", page("Public", "p", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1).with_rate_limit(0.4);

    let start = Instant::now();
    let result = engine.crawl(&config, None).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.visited, vec![url(&server, "/"), url(&server, "/public")]);
    // One interval for the refused URL; the public page follows without a second one
    assert!(elapsed >= Duration::from_millis(400));
    assert!(elapsed < Duration::from_millis(750));
}

#[tokio::test]
async fn test_same_domain_only() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;

    // Reachable, but under a different host name than the seed
    let other_port = Url::parse(&other.uri()).unwrap().port().unwrap();
    let foreign = format!("http://localhost:{}/foreign", other_port);

    mount_page(&server, "/", page("Home", "Index", &[&foreign, "/local"]), 1).await;
    mount_page(&server, "/local", page("Local", "l", &[]), 1).await;
    mount_page(&other, "/foreign", page("Foreign", "f", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server)
        .with_max_depth(1)
        .with_same_domain_only(true);
    let result = engine.crawl(&config, None).await.unwrap();

    let seed_host = Url::parse(&server.uri()).unwrap().host_str().unwrap().to_string();
    for visited in &result.visited {
        assert_eq!(Url::parse(visited).unwrap().host_str(), Some(seed_host.as_str()));
    }
    assert_eq!(result.visited.len(), 2);
}

#[tokio::test]
async fn test_keyword_highlighting() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Hello page", "Hello world", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_keywords(["Hello"]);
    let result = engine.crawl(&config, None).await.unwrap();

    let record = result.pages.get(&url(&server, "/")).unwrap();
    assert!(record.body.contains("**Hello** world"));
    assert_eq!(record.title, "Hello page");
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a", "/b", "/a?x=1"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &["/b", "/", "/a#top"]), 1).await;
    mount_page(&server, "/b", page("B", "b", &["/a", "/"]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(3).with_max_pages(10);
    let result = engine.crawl(&config, None).await.unwrap();

    let unique: HashSet<_> = result.visited.iter().collect();
    assert_eq!(unique.len(), result.visited.len());
    assert_eq!(
        result.visited,
        vec![url(&server, "/"), url(&server, "/a"), url(&server, "/b")]
    );
}

#[tokio::test]
async fn test_reset_allows_recrawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &[]), 2).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(0);

    engine.crawl(&config, None).await.unwrap();

    // Without a reset, the seed is already visited
    let again = engine.crawl(&config, None).await.unwrap();
    assert_eq!(again.visited.len(), 1);
    assert_eq!(engine.stats().successful_fetches, 1);

    engine.reset();
    assert!(engine.visited().is_empty());
    assert!(engine.pages().is_empty());
    assert_eq!(engine.stats().pages_visited, 0);

    let fresh = engine.crawl(&config, None).await.unwrap();
    assert_eq!(fresh.visited, vec![url(&server, "/")]);
    assert_eq!(engine.stats().pages_visited, 1);
}

#[tokio::test]
async fn test_cancellation_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 0).await;
    mount_page(&server, "/b", page("B", "b", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let handle = engine.cancel_handle();
    let progress: ProgressCallback = Arc::new(move |_: usize, _: usize| handle.cancel());

    let config = config_for(&server).with_max_depth(1);
    let result = engine.crawl(&config, Some(progress)).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/")]);
    assert_eq!(result.pages.len(), 1);
}

#[tokio::test]
async fn test_cancellation_holds_until_reset() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(0);

    engine.cancel_handle().cancel();
    let first = engine.crawl(&config, None).await.unwrap();
    let second = engine.crawl(&config, None).await.unwrap();
    assert!(first.visited.is_empty());
    assert!(second.visited.is_empty());

    engine.reset();
    let result = engine.crawl(&config, None).await.unwrap();
    assert_eq!(result.visited, vec![url(&server, "/")]);
}

#[tokio::test]
async fn test_progress_reports_each_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 1).await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&calls);
    let progress: ProgressCallback = Arc::new(move |current: usize, total: usize| {
        recorder.lock().unwrap().push((current, total));
    });

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1).with_max_pages(5);
    engine.crawl(&config, Some(progress)).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![(1, 5), (2, 5)]);
}

#[tokio::test]
async fn test_documentation_links_expanded_first() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/blog", "/docs/guide"]), 1).await;
    mount_page(&server, "/docs/guide", page("Guide", "g", &[]), 1).await;
    mount_page(&server, "/blog", page("Blog", "b", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1).with_max_pages(2);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(
        result.visited,
        vec![url(&server, "/"), url(&server, "/docs/guide")]
    );
}

#[tokio::test]
async fn test_discovery_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/blog", "/docs/guide"]), 1).await;
    mount_page(&server, "/blog", page("Blog", "b", &[]), 1).await;
    mount_page(&server, "/docs/guide", page("Guide", "g", &[]), 0).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server)
        .with_max_depth(1)
        .with_max_pages(2)
        .with_link_order(LinkOrder::Discovery);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/"), url(&server, "/blog")]);
}

#[tokio::test]
async fn test_invalid_config() {
    let mut engine = CrawlEngine::new().unwrap();

    let result = engine
        .crawl(&CrawlConfig::new("not a url"), None)
        .await;
    assert!(matches!(result, Err(SweepError::Config(_))));

    let result = engine
        .crawl(&CrawlConfig::new("https://example.com").with_rate_limit(-1.0), None)
        .await;
    assert!(matches!(result, Err(SweepError::Config(_))));
}

#[tokio::test]
async fn test_reports_after_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "Second page", &[]), 1).await;

    let mut engine = CrawlEngine::new().unwrap();
    let config = config_for(&server).with_max_depth(1);
    let result = engine.crawl(&config, None).await.unwrap();

    let first = render_text(engine.pages(), engine.stats());
    let second = render_text(engine.pages(), engine.stats());
    assert_eq!(first, second);
    assert!(first.contains("SCRAPED CONTENT FROM 2 PAGES"));
    assert!(first.contains(&format!("URL: {}", url(&server, "/a"))));

    let json = render_structured(&result.pages).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[url(&server, "/a")]["title"], "A");
}

struct FailingExtractor;

impl Extractor for FailingExtractor {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn extract(
        &self,
        _base_url: &Url,
        _html: &str,
        _options: &ExtractOptions,
    ) -> Result<PageRecord, ExtractError> {
        Err(ExtractError::Malformed("unreadable".to_string()))
    }
}

#[tokio::test]
async fn test_extraction_failure_stores_empty_record() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "Index", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", "a", &[]), 0).await;

    let mut engine = CrawlEngine::new()
        .unwrap()
        .with_extractor(Box::new(FailingExtractor));
    let config = config_for(&server).with_max_depth(2);
    let result = engine.crawl(&config, None).await.unwrap();

    assert_eq!(result.visited, vec![url(&server, "/")]);
    let record = result.pages.get(&url(&server, "/")).unwrap();
    assert!(record.is_empty());
    assert_eq!(engine.stats().successful_fetches, 1);
    assert_eq!(engine.stats().pages_visited, 1);
}
