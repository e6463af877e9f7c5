//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small site and run link collection and
//! full crawls against it. The mock server listens on 127.0.0.1, so the
//! domain suffix used here is "0.1".

use campus_search::config::Config;
use campus_search::crawler::{Coordinator, FetchError, Fetcher, LinkCollector};
use campus_search::url::DomainFilter;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(root: &str, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.root = root.to_string();
    config.crawler.max_depth = max_depth;
    config.crawler.max_concurrent_fetches = 4;
    config.crawler.domain_suffix = "0.1".to_string();
    config.fetch.timeout_ms = 200;
    config.fetch.retry_delay_ms = 0;
    config
}

/// An HTML page with one content paragraph and the given links
fn page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        r#"<html><body><nav>{}</nav><div class="entry-content"><p>{}</p></div></body></html>"#,
        anchors, text
    )
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn collector(config: &Config) -> LinkCollector {
    let fetcher = Arc::new(Fetcher::new(&config.fetch).unwrap());
    LinkCollector::new(
        fetcher,
        DomainFilter::new(&config.crawler.domain_suffix),
        config.crawler.max_concurrent_fetches as usize,
    )
}

fn root_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).unwrap()
}

fn paths(urls: &[Url]) -> Vec<String> {
    urls.iter().map(|u| u.path().to_string()).collect()
}

#[tokio::test]
async fn test_depth_zero_collects_root_links_without_expanding_them() {
    let server = MockServer::start().await;
    serve(&server, "/", page("home", &["/a", "/b"])).await;
    serve(&server, "/a", page("a", &["/c"])).await;
    serve(&server, "/b", page("b", &[])).await;

    let config = test_config(&server.uri(), 0);
    let outcome = collector(&config).collect(root_url(&server), 0).await;

    assert_eq!(paths(&outcome.frontier.flatten()), vec!["/", "/a", "/b"]);
    assert_eq!(outcome.frontier.bucket(1).len(), 2);
    // Only the root is fetched during collection at depth 0
    assert_eq!(outcome.pages.len(), 1);
}

#[tokio::test]
async fn test_discovery_order_and_depth_buckets() {
    let server = MockServer::start().await;
    serve(&server, "/", page("home", &["/b", "/a"])).await;
    // /a finishes well before /b
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("b", &["/d"]))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    serve(&server, "/a", page("a", &["/c"])).await;
    serve(&server, "/c", page("c", &["/e"])).await;
    serve(&server, "/d", page("d", &[])).await;

    let mut config = test_config(&server.uri(), 1);
    config.fetch.timeout_ms = 1000;
    let outcome = collector(&config).collect(root_url(&server), 1).await;

    assert_eq!(paths(outcome.frontier.bucket(0)), vec!["/"]);
    assert_eq!(paths(outcome.frontier.bucket(1)), vec!["/b", "/a"]);
    // Links of /b come before links of /a regardless of which fetch finished first
    assert_eq!(paths(outcome.frontier.bucket(2)), vec!["/d", "/c"]);
    // Bucket 2 is never expanded, so /e is not collected
    assert!(outcome.frontier.bucket(3).is_empty());
    assert_eq!(outcome.frontier.len(), 5);
}

#[tokio::test]
async fn test_addresses_are_never_collected_twice() {
    let server = MockServer::start().await;
    serve(&server, "/", page("home", &["/a", "/b", "/a", "/#top"])).await;
    serve(&server, "/a", page("a", &["/b", "/c", "/", "/c#section"])).await;
    serve(&server, "/b", page("b", &["/c", "/a"])).await;
    serve(&server, "/c", page("c", &["/"])).await;

    let config = test_config(&server.uri(), 2);
    let outcome = collector(&config).collect(root_url(&server), 2).await;

    let flat = paths(&outcome.frontier.flatten());
    assert_eq!(flat, vec!["/", "/a", "/b", "/c"]);

    // First discovery depth wins: /c was first seen while expanding depth 1
    assert_eq!(paths(outcome.frontier.bucket(2)), vec!["/c"]);
}

#[tokio::test]
async fn test_links_outside_the_suffix_are_dropped() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        page(
            "home",
            &[
                "/inside",
                "http://www.vols.com/tickets",
                "https://example.org/",
                "mailto:someone@utk.edu",
            ],
        ),
    )
    .await;
    serve(&server, "/inside", page("inside", &[])).await;

    let config = test_config(&server.uri(), 1);
    let outcome = collector(&config).collect(root_url(&server), 1).await;

    assert_eq!(paths(&outcome.frontier.flatten()), vec!["/", "/inside"]);
    for url in outcome.frontier.flatten() {
        assert_eq!(url.host_str(), Some("127.0.0.1"));
    }
}

#[tokio::test]
async fn test_root_is_kept_even_when_it_fails_the_filter() {
    let server = MockServer::start().await;
    serve(&server, "/", page("home", &["/a"])).await;

    let mut config = test_config(&server.uri(), 1);
    config.crawler.domain_suffix = "utk.edu".to_string();
    let outcome = collector(&config).collect(root_url(&server), 1).await;

    assert_eq!(paths(&outcome.frontier.flatten()), vec!["/"]);
}

#[tokio::test]
async fn test_timed_out_address_contributes_nothing_while_siblings_complete() {
    let server = MockServer::start().await;
    serve(&server, "/", page("home", &["/slow", "/fast"])).await;
    serve(&server, "/fast", page("fast sibling", &["/deep"])).await;
    serve(&server, "/deep", page("deep page", &[])).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("never seen", &["/hidden"]))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(10)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 1);
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    let addresses: Vec<&str> = outcome
        .corpus
        .documents()
        .iter()
        .map(|doc| doc.address.as_str())
        .collect();
    let root = format!("{}/", server.uri());
    let fast = format!("{}/fast", server.uri());
    let deep = format!("{}/deep", server.uri());
    assert_eq!(addresses, vec![root.as_str(), fast.as_str(), deep.as_str()]);

    assert_eq!(outcome.report.addresses, 4);
    assert_eq!(outcome.report.fetch_failures, 1);
    assert_eq!(outcome.report.documents, 3);
    assert!(outcome
        .corpus
        .documents()
        .iter()
        .all(|doc| !doc.address.ends_with("/hidden")));
}

#[tokio::test]
async fn test_missing_page_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 0);
    let fetcher = Fetcher::new(&config.fetch).unwrap();
    let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    serve(&server, "/flaky", page("recovered", &[])).await;

    let config = test_config(&server.uri(), 0);
    let fetcher = Fetcher::new(&config.fetch).unwrap();
    let fetched = fetcher
        .fetch(&format!("{}/flaky", server.uri()))
        .await
        .unwrap();

    assert_eq!(fetched.status_code, 200);
    assert!(fetched.body.contains("recovered"));
}

#[tokio::test]
async fn test_persistent_server_error_exhausts_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri(), 0);
    config.fetch.max_attempts = 3;
    let fetcher = Fetcher::new(&config.fetch).unwrap();
    let result = fetcher.fetch(&format!("{}/down", server.uri())).await;

    match result {
        Err(FetchError::Exhausted { attempts, last, .. }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, FetchError::Status { status: 500, .. }));
        }
        other => panic!("expected exhausted error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_target_is_the_link_base() {
    let server = MockServer::start().await;
    let location = format!("{}/new/", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&server)
        .await;
    serve(&server, "/new/", page("moved", &["child"])).await;

    let config = test_config(&server.uri(), 0);
    let root = Url::parse(&format!("{}/old", server.uri())).unwrap();
    let outcome = collector(&config).collect(root, 0).await;

    assert_eq!(paths(&outcome.frontier.flatten()), vec!["/old", "/new/child"]);
}

#[tokio::test]
async fn test_crawl_extracts_cleaned_region_text() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        r#"<html><body>
            <a href="/people">People</a>
            <div class="entry-content"><p>Welcome to EECS!</p></div>
            <p>Footer: @utkeecs</p>
        </body></html>"#
            .to_string(),
    )
    .await;
    serve(
        &server,
        "/people",
        r#"<html><body>
            <div class="person-content"><p>Dr. Jane Doe, Professor</p></div>
            <table class="table_default"><tr><td>Office</td><td>MK-401</td></tr></table>
        </body></html>"#
            .to_string(),
    )
    .await;

    let config = test_config(&server.uri(), 0);
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    let texts: Vec<&str> = outcome
        .corpus
        .documents()
        .iter()
        .map(|doc| doc.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["welcome to eecs", "dr jane doe professor office mk401"]
    );
    assert_eq!(outcome.report.empty_documents, 0);
}
