//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the static engine.

use about_crawler::config::{
    CacheConfig, Config, CrawlerConfig, Engine, MatcherConfig, OutputConfig, RendererConfig,
    UserAgentConfig,
};
use about_crawler::crawler::run_crawl;
use about_crawler::output::PageRecord;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "TestCrawler/1.0";

const ABOUT_TEXT: &str = "Example Co. was founded in 2001 by two engineers who wanted to make \
     dependable tools for small businesses. Today we serve customers on three continents.";

/// Creates a test configuration using the static engine with no delays
fn create_test_config(seeds: Vec<String>, output: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            seeds,
            download_delay_ms: 0,
        },
        renderer: RendererConfig {
            engine: Engine::Static,
            settle_ms: 0,
            ..Default::default()
        },
        user_agent: UserAgentConfig {
            value: TEST_USER_AGENT.to_string(),
        },
        cache: CacheConfig {
            enabled: false,
            ..Default::default()
        },
        matcher: MatcherConfig::default(),
        output: OutputConfig {
            path: output.display().to_string(),
        },
    }
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn read_records(path: &Path) -> Vec<PageRecord> {
    let content = std::fs::read_to_string(path).expect("output file should exist");
    serde_json::from_str(&content).expect("output should be a JSON array of records")
}

fn output_path(dir: &TempDir) -> PathBuf {
    dir.path().join("about_pages.json")
}

#[tokio::test]
async fn test_about_page_found_and_extracted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/about-us">About Us</a>
        <a href="https://other.com/about">About Partner</a>
        <a href="/contact">Contact</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        &mock_server,
        "/about-us",
        format!(
            r#"<html><head><title>About Us</title></head><body>
            <nav><a href="/">Home</a></nav>
            <main><h1>Who we are</h1><p>{}</p></main>
            <footer>Copyright 2024</footer>
            </body></html>"#,
            ABOUT_TEXT
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));

    let stats = run_crawl(config).await.expect("crawl should succeed");

    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.url, format!("{}/about-us", base_url));
    assert_eq!(record.page_title.as_deref(), Some("About Us"));
    assert_eq!(
        record.content(),
        Some(format!("Who we are\n{}", ABOUT_TEXT).as_str())
    );

    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.from_container, 1);
}

#[tokio::test]
async fn test_output_uses_flat_record_shape() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/about">About</a>"#).await;
    mount_page(
        &mock_server,
        "/about",
        format!("<title>About</title><article>{}</article>", ABOUT_TEXT),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    run_crawl(config).await.unwrap();

    let raw = std::fs::read_to_string(output_path(&dir)).unwrap();
    assert!(raw.starts_with("[\n    {"));

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = value[0].as_object().unwrap();
    let mut keys: Vec<&str> = entry.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["content", "page_title", "page_type", "scraped_at", "url"]
    );
    assert_eq!(entry["page_type"], "about_page");
}

#[tokio::test]
async fn test_homepage_without_about_links_is_extracted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            "<html><head><title>Plain</title></head><body><p>{}</p></body></html>",
            ABOUT_TEXT
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    let stats = run_crawl(config).await.unwrap();

    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/", base_url));
    assert_eq!(records[0].page_title.as_deref(), Some("Plain"));
    assert_eq!(records[0].content(), Some(ABOUT_TEXT));
    assert_eq!(stats.seeds_self_extracted, 1);
}

#[tokio::test]
async fn test_failed_candidate_does_not_stop_the_next() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about">About</a><a href="/our-story">Our Story</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/our-story",
        format!("<main>{}</main>", ABOUT_TEXT),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    let stats = run_crawl(config).await.unwrap();

    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/our-story", base_url));
    assert_eq!(stats.render_failures, 1);
}

#[tokio::test]
async fn test_failed_seed_does_not_stop_the_next() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let healthy = MockServer::start().await;
    mount_page(&healthy, "/", r#"<a href="/about">About us</a>"#).await;
    mount_page(&healthy, "/about", format!("<main>{}</main>", ABOUT_TEXT)).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![format!("{}/", broken.uri()), format!("{}/", healthy.uri())],
        &output_path(&dir),
    );
    let stats = run_crawl(config).await.unwrap();

    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/about", healthy.uri()));
    assert_eq!(stats.seeds_failed, 1);
    assert_eq!(stats.seeds_processed, 2);
}

#[tokio::test]
async fn test_links_to_other_hosts_are_not_followed() {
    let partner = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(format!("<main>{}</main>", ABOUT_TEXT)))
        .expect(0)
        .mount(&partner)
        .await;

    let site = MockServer::start().await;
    mount_page(
        &site,
        "/",
        format!(
            r#"<a href="{}/about">About our partner</a><p>{}</p>"#,
            partner.uri(),
            ABOUT_TEXT
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", site.uri())], &output_path(&dir));
    run_crawl(config).await.unwrap();

    // Only the homepage itself is extracted
    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/", site.uri()));
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<nav><a href="/about">About</a></nav><footer><a href="/about">About us</a></footer>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(format!("<main>{}</main>", ABOUT_TEXT)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    let stats = run_crawl(config).await.unwrap();

    assert_eq!(read_records(&output_path(&dir)).len(), 1);
    assert_eq!(stats.duplicates_suppressed, 1);
}

#[tokio::test]
async fn test_duplicate_seeds_crawled_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<p>{}</p>", ABOUT_TEXT)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![format!("{}/", base_url), format!("{}/", base_url)],
        &output_path(&dir),
    );
    run_crawl(config).await.unwrap();

    assert_eq!(read_records(&output_path(&dir)).len(), 1);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(html(format!("<p>{}</p>", ABOUT_TEXT)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    run_crawl(config).await.unwrap();

    assert_eq!(read_records(&output_path(&dir)).len(), 1);
}

#[tokio::test]
async fn test_disk_cache_serves_second_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/about">About</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(format!("<main>{}</main>", ABOUT_TEXT)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_dir = dir.path().join("httpcache");

    for _ in 0..2 {
        let mut config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
        config.cache = CacheConfig {
            enabled: true,
            expiration_secs: 3600,
            directory: Some(cache_dir.display().to_string()),
        };
        run_crawl(config).await.unwrap();

        let records = read_records(&output_path(&dir));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content(), Some(ABOUT_TEXT));
    }
}

#[tokio::test]
async fn test_short_page_falls_back_to_full_body() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/about">About</a>"#).await;
    mount_page(
        &mock_server,
        "/about",
        r#"<header>Example Co.</header><p>Small team, big ideas.</p><footer>Call 555-0100</footer>"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], &output_path(&dir));
    let stats = run_crawl(config).await.unwrap();

    let records = read_records(&output_path(&dir));
    assert_eq!(
        records[0].content(),
        Some("Example Co.\nSmall team, big ideas.\nCall 555-0100")
    );
    assert_eq!(stats.from_raw_body, 1);
}

#[tokio::test]
async fn test_redirected_seed_follows_links_on_landing_host() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();
    let landing = format!("http://localhost:{}", port);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/home", landing).as_str()),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/home",
        r#"<p>Welcome home</p><a href="/about">About Us</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(format!("<main>{}</main>", ABOUT_TEXT)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", mock_server.uri())], &output_path(&dir));
    run_crawl(config).await.unwrap();

    let records = read_records(&output_path(&dir));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/about", landing));
    assert_eq!(records[0].content(), Some(ABOUT_TEXT));
}
