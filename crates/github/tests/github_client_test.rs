//! Integration tests for GitHubClient.
//!
//! Uses wiremock for the contents API. Covers pagination termination
//! (repeated page, empty page, page cap), status mapping, timeouts and raw
//! downloads.

use code_review_core::{
    traits::{ContentSource, RepositoryHost},
    types::{EntryKind, FileEntry, RepositoryReference},
    Error, error::LISTING_FAILED,
};
use code_review_github::{GitHubClient, GitHubClientConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTENTS_PATH: &str = "/repos/octo/hello/contents";

fn reference() -> RepositoryReference {
    RepositoryReference::new("octo", "hello")
}

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let config = GitHubClientConfig::default()
        .with_api_url(mock_server.uri())
        .with_token("test-token");
    GitHubClient::new(config).expect("failed to create client")
}

async fn mount_page(mock_server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

fn named(name: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        kind: EntryKind::default(),
        download_url: None,
    }
}

#[tokio::test]
async fn test_repeated_page_stops_pagination() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "a"}])).await;
    mount_page(&mock_server, 2, json!([{"name": "a"}])).await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");

    assert_eq!(listing, vec![named("a")]);
}

#[tokio::test]
async fn test_backend_repeating_first_page_forever_terminates() {
    let mock_server = MockServer::start().await;

    // Ignores the page parameter entirely
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "main.rs", "type": "file", "download_url": "http://raw/main.rs"},
            {"name": "src", "type": "dir", "download_url": null}
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");

    assert_eq!(
        listing,
        vec![FileEntry::file("main.rs", "http://raw/main.rs"), FileEntry::directory("src")]
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_empty_page_stops_pagination() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "a"}])).await;
    mount_page(&mock_server, 2, json!([])).await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");

    assert_eq!(listing, vec![named("a")]);
}

#[tokio::test]
async fn test_pages_are_concatenated_in_order() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "a"}, {"name": "b"}])).await;
    mount_page(&mock_server, 2, json!([{"name": "c"}])).await;
    mount_page(&mock_server, 3, json!([])).await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");

    assert_eq!(listing, vec![named("a"), named("b"), named("c")]);
}

#[tokio::test]
async fn test_page_cap_fails_with_upstream_error() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "a"}])).await;
    mount_page(&mock_server, 2, json!([{"name": "b"}])).await;
    mount_page(&mock_server, 3, json!([{"name": "c"}])).await;

    let config = GitHubClientConfig::default()
        .with_api_url(mock_server.uri())
        .with_max_pages(2);
    let client = GitHubClient::new(config).unwrap();
    let result = client.fetch_listing(&reference()).await;

    assert!(matches!(result, Err(Error::Upstream { status: None, .. })));
}

#[tokio::test]
async fn test_bearer_token_and_accept_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");
    assert!(listing.is_empty());
}

#[tokio::test]
async fn test_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    match client.fetch_listing(&reference()).await {
        Err(Error::NotFound { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, LISTING_FAILED);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forbidden_is_access_denied() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.fetch_listing(&reference()).await;

    assert!(matches!(result, Err(Error::AccessDenied { status: 403, .. })));
}

#[tokio::test]
async fn test_other_status_is_upstream_error() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "a"}])).await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    match client.fetch_listing(&reference()).await {
        Err(err @ Error::Upstream { .. }) => {
            assert_eq!(err.status_code(), 500);
            assert_eq!(err.detail(), LISTING_FAILED);
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_page_is_upstream_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "not a list"})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.fetch_listing(&reference()).await;

    assert!(matches!(result, Err(Error::Upstream { status: None, .. })));
}

#[tokio::test]
async fn test_fetch_raw_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fn main() {}"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let body = client
        .fetch_raw(&format!("{}/raw/main.rs", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(body, "fn main() {}");
}

#[tokio::test]
async fn test_fetch_raw_failure_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/gone.rs"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .fetch_raw(&format!("{}/raw/gone.rs", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(Error::Upstream { status: Some(410), .. })));
}

#[tokio::test]
async fn test_pages_differing_only_in_unknown_tag_are_not_duplicates() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([{"name": "lib", "type": "symlink"}])).await;
    mount_page(&mock_server, 2, json!([{"name": "lib", "type": "submodule"}])).await;
    mount_page(&mock_server, 3, json!([])).await;

    let client = create_test_client(&mock_server);
    let listing = client.fetch_listing(&reference()).await.expect("fetch failed");

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].kind, EntryKind::Other("symlink".into()));
    assert_eq!(listing[1].kind, EntryKind::Other("submodule".into()));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_listing_timeout_is_upstream_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = GitHubClientConfig::default()
        .with_api_url(mock_server.uri())
        .with_timeout(Duration::from_millis(50));
    let client = GitHubClient::new(config).unwrap();

    match client.fetch_listing(&reference()).await {
        Err(err @ Error::Upstream { status: None, .. }) => {
            assert_eq!(err.status_code(), 502);
            assert_eq!(err.kind(), "UPSTREAM_ERROR");
            assert!(err.detail().contains("timed out"));
        }
        other => panic!("expected Upstream timeout, got {:?}", other),
    }
}
