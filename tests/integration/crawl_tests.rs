//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use product_crawler::config::Config;
use product_crawler::crawler::Coordinator;
use product_crawler::output::write_product_csv;
use product_crawler::{crawl, CrawlPhase, PageOutcome};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration starting at the mock server root, with no delay
fn create_test_config(base_url: &str, max_pages: u64) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = format!("{}/", base_url);
    config.crawler.max_pages = max_pages;
    config.crawler.delay_secs = 0.0;
    config.http.user_agent = "TestBot/1.0 (+https://example.com/bot)".to_string();
    config.http.timeout_secs = 5;
    config
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

/// Mounts a GET handler that must be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_finds_product_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Reached through `localhost`, a different host from the 127.0.0.1 start: never contacted
    let off_site = MockServer::start().await;
    let off_site_port = url::Url::parse(&off_site.uri())
        .expect("Failed to parse off-site URL")
        .port()
        .expect("Mock server URI has a port");
    Mock::given(method("GET"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&off_site)
        .await;

    // Category page: not a product, links to both products and off-site
    mount_page(
        &mock_server,
        "/",
        html(format!(
            r##"<html><head><title>Suspension</title></head><body>
            <a href="/p1">Bush kit</a>
            <a href="{base_url}/p2/">Arm</a>
            <a href="#top">Top</a>
            <a href="mailto:sales@example.com">Email</a>
            <a href="http://localhost:{off_site_port}/elsewhere">Partner</a>
            <a href="https://www.facebook.com/shop">Facebook</a>
            </body></html>"##
        )),
        1,
    )
    .await;

    // Product exposing only Open Graph
    mount_page(
        &mock_server,
        "/p1",
        html(
            r#"<html><head><meta property="og:type" content="product"></head>
            <body><a href="/">Home</a><a href="/p2?ref=related">Related</a></body></html>"#,
        ),
        1,
    )
    .await;

    // Product exposing only JSON-LD, with a canonical link
    mount_page(
        &mock_server,
        "/p2",
        html(
            r#"<html><head>
            <link rel="canonical" href="/p2">
            <script type="application/ld+json">{"@context":"https://schema.org","@type":"Product"}</script>
            </head><body><a href="/p1/">Other</a></body></html>"#,
        ),
        1,
    )
    .await;

    let config = create_test_config(&base_url, 50);
    let report = crawl(&config).await.expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.stop_reason, CrawlPhase::FrontierEmpty);
    assert_eq!(
        report.product_urls,
        vec![format!("{}/p1", base_url), format!("{}/p2", base_url)]
    );
    assert_eq!(report.stats.count(PageOutcome::Product), 2);
    assert_eq!(report.stats.count(PageOutcome::Processed), 1);
    assert_eq!(report.stats.fetch_attempts(), 3);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_robots_disallowed_path_is_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin/\n"))
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/admin/orders">Admin</a><a href="/shop">Shop</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/admin/orders", html("<html></html>"), 0).await;
    mount_page(
        &mock_server,
        "/shop",
        html(r#"<div class="product-info-main">Kit</div>"#),
        1,
    )
    .await;

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.stats.count(PageOutcome::RobotsDenied), 1);
    assert_eq!(report.product_urls, vec![format!("{}/shop", base_url)]);
}

#[tokio::test]
async fn test_robots_server_error_is_permissive() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500).set_body_string("User-agent: *\nDisallow: /\n"))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", html("<html><body>Home</body></html>"), 1).await;

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.stats.count(PageOutcome::RobotsDenied), 0);
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/a">A</a>"#), 1).await;
    mount_page(&mock_server, "/a", html(r#"<a href="/b">B</a>"#), 1).await;
    mount_page(&mock_server, "/b", html(r#"<a href="/c">C</a>"#), 0).await;

    let report = crawl(&create_test_config(&base_url, 2))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.stop_reason, CrawlPhase::BudgetExhausted);
    assert!(report.product_urls.is_empty());
}

#[tokio::test]
async fn test_failed_fetches_consume_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Port 1 on the same host is in scope but refuses connections;
    // /missing is unmatched and answers 404
    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="http://127.0.0.1:1/down">Down</a><a href="/missing">Gone</a>"#),
        1,
    )
    .await;

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Transport failures must not abort the crawl");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.stats.count(PageOutcome::TransportFailed), 1);
    assert_eq!(report.stats.count(PageOutcome::HttpError), 1);
    assert_eq!(report.stop_reason, CrawlPhase::FrontierEmpty);
}

#[tokio::test]
async fn test_non_html_response_is_not_classified() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/catalog.pdf">Catalog</a>"#), 1).await;
    mount_page(
        &mock_server,
        "/catalog.pdf",
        ResponseTemplate::new(200).set_body_raw(
            r#"<div class="product-info-main"></div><a href="/hidden">Hidden</a>"#,
            "application/pdf",
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/hidden", html("<html></html>"), 0).await;

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.stats.count(PageOutcome::NotHtml), 1);
    assert!(report.product_urls.is_empty());
}

#[tokio::test]
async fn test_redirected_product_uses_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/old-kit">Kit</a>"#), 1).await;
    mount_page(
        &mock_server,
        "/old-kit",
        ResponseTemplate::new(301).insert_header("Location", "/new-kit?utm_source=redirect"),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/new-kit",
        html(r#"<meta property="og:type" content="product"><a href="/">Home</a>"#),
        1,
    )
    .await;

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.product_urls, vec![format!("{}/new-kit", base_url)]);
}

#[tokio::test]
async fn test_robots_crawl_delay_raises_delay() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 0.05\n"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", html("<html></html>"), 1).await;

    let config = create_test_config(&base_url, 50);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(coordinator.delay(), Duration::from_millis(50));
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
}

#[tokio::test]
async fn test_csv_output_is_sorted_with_header() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/zeta">Z</a><a href="/alpha">A</a>"#),
        1,
    )
    .await;
    for route in ["/zeta", "/alpha"] {
        mount_page(
            &mock_server,
            route,
            html(r#"<script>{"@type": "Product"}</script>"#),
            1,
        )
        .await;
    }

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("products.csv");
    write_product_csv(&csv_path, &report.product_urls).expect("Failed to write CSV");

    let written = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(
        written,
        format!("url\n{base_url}/alpha\n{base_url}/zeta\n")
    );
}

#[tokio::test]
async fn test_canonical_aliases_collapse_to_one_product() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/kit-a">Kit A</a><a href="/kit-b">Kit B</a>"#),
        1,
    )
    .await;
    for route in ["/kit-a", "/kit-b"] {
        mount_page(
            &mock_server,
            route,
            html(
                r#"<html><head>
                <meta property="og:type" content="product">
                <link rel="canonical" href="/kit">
                </head></html>"#,
            ),
            1,
        )
        .await;
    }

    let report = crawl(&create_test_config(&base_url, 50))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.stats.count(PageOutcome::Product), 2);
    assert_eq!(report.product_urls, vec![format!("{}/kit", base_url)]);
}

#[tokio::test]
async fn test_unrepresentable_crawl_delay_is_ignored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 1e20\n"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/",
        html(r#"<meta property="og:type" content="product">"#),
        1,
    )
    .await;

    let config = create_test_config(&base_url, 50);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl should succeed");

    assert!(coordinator.delay().is_zero());
    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.product_urls, vec![format!("{}/", base_url)]);
}
