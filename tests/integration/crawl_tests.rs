//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small sites over HTTP and run the full
//! crawl cycle end-to-end through the reqwest fetcher.

use sitewalk::config::Config;
use sitewalk::crawler::{Crawler, DedupPolicy};
use sitewalk::url::{Address, OriginPrefix};
use sitewalk::{CrawlError, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>{}</body></html>"#,
        title, anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
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

fn crawler(workers: usize) -> Crawler {
    let mut config = Config::default();
    config.crawler.workers = workers;
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    Crawler::from_config(&config).expect("Failed to build crawler")
}

/// Home page linking to /about twice (once with a fragment), /about linking back
async fn home_and_about(server: &MockServer) {
    let base_url = server.uri();
    mount_page(
        server,
        "/",
        html("Home", &["/about", &format!("{}/about#team", base_url)]),
    )
    .await;
    mount_page(server, "/about", html("About", &["/"])).await;
}

#[tokio::test]
async fn test_fragment_variants_collapse_to_one_page() {
    let mock_server = MockServer::start().await;
    home_and_about(&mock_server).await;
    let base_url = mock_server.uri();

    let outcome = crawler(2)
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    let addresses: Vec<String> = outcome
        .pages()
        .iter()
        .map(|p| p.address().to_string())
        .collect();
    assert_eq!(addresses, vec![base_url.clone(), format!("{}/about", base_url)]);

    let home = outcome
        .results
        .get(&Address::parse(&base_url).unwrap())
        .expect("home page missing");
    assert_eq!(home.title(), "Home");
    assert_eq!(home.outgoing_links().len(), 2);
    assert_eq!(home.outgoing_links()[0], home.outgoing_links()[1]);
}

#[tokio::test]
async fn test_fetch_failure_surfaces_error_with_partial_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Home", &["/about"])).await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = crawler(2).crawl(&format!("{}/", base_url)).await;

    let err = match result {
        Err(CrawlError::Orchestration(err)) => err,
        other => panic!("expected orchestration error, got {:?}", other.map(|o| o.results.len())),
    };
    assert!(matches!(
        err.fetch_error(),
        FetchError::Status { status: 500, .. }
    ));
    assert_eq!(
        err.fetch_error().address().to_string(),
        format!("{}/about", base_url)
    );
    assert!(err.partial().contains(&Address::parse(&base_url).unwrap()));
}

#[tokio::test]
async fn test_missing_page_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Home", &["/gone"])).await;

    let result = crawler(3).crawl(&format!("{}/", base_url)).await;
    assert!(matches!(result, Err(CrawlError::Orchestration(_))));
}

#[tokio::test]
async fn test_worker_count_does_not_change_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Root", &["/a", "/b", "/c"])).await;
    mount_page(&mock_server, "/a", html("A", &["/a/1", "/a/2", "/"])).await;
    mount_page(&mock_server, "/b", html("B", &["/a", "/b/1"])).await;
    mount_page(&mock_server, "/c", html("C", &["/c/", "/b/1"])).await;
    mount_page(&mock_server, "/a/1", html("A1", &["/a/2"])).await;
    mount_page(&mock_server, "/a/2", html("A2", &[])).await;
    mount_page(&mock_server, "/b/1", html("B1", &["/c"])).await;

    let seed = format!("{}/", base_url);
    let single = crawler(1).crawl(&seed).await.expect("Crawl failed");
    let many = crawler(8).crawl(&seed).await.expect("Crawl failed");

    assert_eq!(single.results.len(), 7);
    assert_eq!(single.workers.len(), 1);
    assert_eq!(single.workers[0].jobs, 7);
    assert_eq!(many.workers.len(), 8);
    assert_eq!(single.into_map(), many.into_map());
}

#[tokio::test]
async fn test_crawl_stays_under_seed_prefix() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The seed's trailing slash is normalized away, so the index is requested as /docs
    mount_page(
        &mock_server,
        "/docs",
        html(
            "Docs",
            &["/docs/intro", "/blog", "http://other.invalid/docs/"],
        ),
    )
    .await;
    mount_page(&mock_server, "/docs/intro", html("Intro", &["/docs/", "/"])).await;
    // Reachable but outside the prefix; fetching it would be a bug
    mount_page(&mock_server, "/blog", html("Blog", &[])).await;
    mount_page(&mock_server, "/", html("Root", &[])).await;

    let outcome = crawler(4)
        .crawl(&format!("{}/docs/", base_url))
        .await
        .expect("Crawl failed");

    let prefix = OriginPrefix::from_seed(&outcome.seed);
    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.pages().iter().all(|p| prefix.contains(p.address())));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| r.url.path().starts_with("/docs")));
}

#[tokio::test]
async fn test_strict_dedup_requests_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every page links to every other page
    let routes = ["/", "/1", "/2", "/3", "/4", "/5"];
    for route in routes {
        mount_page(&mock_server, route, html(route, &routes)).await;
    }

    let outcome = crawler(6)
        .with_dedup(DedupPolicy::Strict)
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.results.len(), routes.len());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), routes.len());
}

#[tokio::test]
async fn test_page_without_title() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "<html><body><p>No title here</p></body></html>".to_string(),
    )
    .await;

    let outcome = crawler(2)
        .crawl(&base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.pages()[0].title(), "");
}

#[tokio::test]
async fn test_crawl_function_returns_map() {
    let mock_server = MockServer::start().await;
    home_and_about(&mock_server).await;
    let base_url = mock_server.uri();

    let pages = sitewalk::crawl(&format!("{}/", base_url), 2)
        .await
        .expect("Crawl failed");

    assert_eq!(pages.len(), 2);
    let about = Address::parse(&format!("{}/about/", base_url)).unwrap();
    assert_eq!(pages[&about].title(), "About");
}

#[tokio::test]
async fn test_live_results_observable_during_crawl() {
    let mock_server = MockServer::start().await;
    home_and_about(&mock_server).await;
    let base_url = mock_server.uri();

    let handle = crawler(2)
        .start(&format!("{}/", base_url))
        .expect("Failed to start crawl");
    let mut progress = handle.results().subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while progress.changed().await.is_ok() {
            let count = *progress.borrow_and_update();
            seen.push(count);
            if count == 2 {
                break;
            }
        }
        seen
    });

    let outcome = handle.wait().await.expect("Crawl failed");
    let seen = watcher.await.unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(seen.last(), Some(&2));
}
