//! HTTP fetcher tests.
//!
//! This module tests document retrieval over HTTP:
//! - Successful GETs parsed as JSON
//! - Status, timeout, transport and body errors mapped onto `FetchError`
//! - Relative URLs joined onto the base URL
//!
//! # Invariants
//! - Errors carry the URL the caller asked for, not the resolved one
//!
//! # What this does NOT handle
//! - Merging or caching (see `aggregator_tests.rs`)

mod common;

use std::time::Duration;

use cfgmerge_client::Fetcher;
use common::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};

async fn fetcher_for(mock_server: &MockServer) -> HttpFetcher {
    HttpFetcher::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_document() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("configurations/auth.json");

    Mock::given(method("GET"))
        .and(path("/configurations/auth.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server).await;
    let document = fetcher.fetch("configurations/auth.json").await.unwrap();

    assert_eq!(document, fixture);
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute/payments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"currency": "EUR"})))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::builder().build().unwrap();
    let url = format!("{}/absolute/payments.json", mock_server.uri());
    let document = fetcher.fetch(&url).await.unwrap();

    assert_eq!(document, json!({"currency": "EUR"}));
}

#[tokio::test]
async fn test_not_found_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configurations/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server).await;
    let err = fetcher
        .fetch("configurations/missing.json")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.url(), "configurations/missing.json");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server).await;
    let err = fetcher.fetch("configurations/auth.json").await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Status {
            url: "configurations/auth.json".to_string(),
            status: 503,
        }
    );
}

#[tokio::test]
async fn test_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("realm = main"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server).await;
    let err = fetcher.fetch("configurations/auth.json").await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidDocument { .. }));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let err = fetcher.fetch("configurations/auth.json").await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let fetcher = HttpFetcher::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = fetcher
        .fetch("http://127.0.0.1:1/configurations/auth.json")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_relative_url_without_base_is_invalid() {
    let fetcher = HttpFetcher::builder().build().unwrap();

    let err = fetcher.fetch("configurations/auth.json").await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}
