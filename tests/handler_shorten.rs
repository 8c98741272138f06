mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use linksnap::api::handlers::shorten_handler;
use linksnap::state::AppState;
use serde_json::json;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/v1", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com/some/page" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["url"], "https://example.com/some/page");
    assert_eq!(body["expiry"], 24);
    assert_eq!(body["rate_limit"], 9);
    assert!(body["rate_limit_reset"].as_u64().unwrap() > 0);

    let short = body["short"].as_str().unwrap();
    let (domain, id) = short.split_once('/').unwrap();
    assert_eq!(domain, common::TEST_DOMAIN);
    assert_eq!(id.len(), 8);
}

#[tokio::test]
async fn test_shorten_written_to_store() {
    let (state, store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com", "short": "stored01" }))
        .await;

    response.assert_status_ok();

    assert_eq!(
        common::read_link(&store, "stored01").await,
        Some("https://example.com".to_string())
    );
}

#[tokio::test]
async fn test_shorten_bare_domain_gets_prefix() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["url"], "http://example.com");
}

#[tokio::test]
async fn test_shorten_preserves_https() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    // Must not come back as http://https://...
    assert_eq!(body["url"], "https://example.com/page");
}

#[tokio::test]
async fn test_shorten_with_custom_id() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com", "short": "abc123" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["short"], format!("{}/abc123", common::TEST_DOMAIN));
}

#[tokio::test]
async fn test_shorten_duplicate_custom_id() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com", "short": "abc123" }))
        .await
        .assert_status_ok();

    // Different client, same id: the identifier namespace is global.
    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.2")
        .json(&json!({ "url": "https://other.com", "short": "abc123" }))
        .await;

    response.assert_status(axum::http::StatusCode::FORBIDDEN);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "duplicate_id");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "http://not a url" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_invalid_custom_id_shape() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "https://example.com", "short": "has/slash" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_rejects_own_domain() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    for url in [
        "http://short.test/abc123",
        "https://www.short.test/abc123",
        "short.test",
    ] {
        let response = server
            .post("/api/v1")
            .add_header("X-Forwarded-For", "203.0.113.1")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "rejected_domain", "url: {}", url);
    }
}

#[tokio::test]
async fn test_shorten_other_domain_allowed() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "http://other.com/x" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_shorten_zero_expiry_defaults_to_24h() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "http://a.com", "expiry": 0 }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["expiry"], 24);
}

#[tokio::test]
async fn test_shorten_explicit_expiry_kept() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    let response = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&json!({ "url": "http://a.com", "expiry": 48 }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["expiry"], 48);
}

#[tokio::test]
async fn test_quota_exhaustion() {
    // Ceiling 2, window 1800s: two creations pass, the third is denied
    // with a positive reset hint.
    let (state, _store) = common::create_test_state(2, 1800);
    let server = make_server(state);

    let first = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com/1" }))
        .await;
    first.assert_status_ok();
    assert_eq!(first.json::<serde_json::Value>()["rate_limit"], 1);

    let second = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com/2" }))
        .await;
    second.assert_status_ok();
    assert_eq!(second.json::<serde_json::Value>()["rate_limit"], 0);

    let third = server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com/3" }))
        .await;
    third.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let body = third.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "quota_exceeded");
    assert!(body["error"]["details"]["rate_limit_reset"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_quota_is_per_client() {
    let (state, _store) = common::create_test_state(1, 1800);
    let server = make_server(state);

    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com/1" }))
        .await
        .assert_status_ok();

    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com/2" }))
        .await
        .assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    // A different client identity still has its full budget.
    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.10")
        .json(&json!({ "url": "https://example.com/2" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_rejected_requests_are_not_charged() {
    let (state, _store) = common::create_test_state(1, 1800);
    let server = make_server(state);

    // An invalid URL fails after admission but before consumption...
    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "http://not a url" }))
        .await
        .assert_status_bad_request();

    // ...so the single budgeted creation still goes through.
    server
        .post("/api/v1")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_missing_client_identity() {
    let (state, _store) = common::default_test_state();
    let server = make_server(state);

    // No forwarding header and no socket peer info in the mock transport.
    let response = server
        .post("/api/v1")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
}
