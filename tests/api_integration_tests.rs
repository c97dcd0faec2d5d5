//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use ttl_cache::{api::create_router, AppState, TtlCache};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_app_with_ttl(Duration::from_secs(300))
}

fn create_app_with_ttl(ttl: Duration) -> Router {
    let state = AppState::new(TtlCache::new(ttl));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == SET / GET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/set",
            r#"{"key":"test_key","value":"test_value"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            r#"{"key":"get_key","value":"get_value"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app
        .oneshot(empty_request("GET", "/get/get_key"))
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/get/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            r#"{"key":"delete_key","value":"delete_value"}"#,
        ))
        .await
        .unwrap();

    let del_response = app
        .clone()
        .oneshot(empty_request("DELETE", "/del/delete_key"))
        .await
        .unwrap();
    assert_eq!(del_response.status(), StatusCode::OK);
    let json = body_to_json(del_response.into_body()).await;
    assert_eq!(json["existed"], true);

    let get_response = app
        .oneshot(empty_request("GET", "/get/delete_key"))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_missing_key_is_ok() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("DELETE", "/del/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["existed"], false);
}

// == APPEND Endpoint Tests ==

#[tokio::test]
async fn test_append_endpoint_accumulates() {
    let app = create_test_app();

    for (value, expected_len) in [("a", 1), ("b", 2), ("c", 3)] {
        let body = json!({ "key": "events", "value": value }).to_string();
        let response = app
            .clone()
            .oneshot(json_request("POST", "/append", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["length"], expected_len);
    }

    let response = app
        .oneshot(empty_request("GET", "/get/events"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_append_endpoint_conflicts_with_single_value() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/set", r#"{"key":"name","value":"alice"}"#))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/append",
            r#"{"key":"name","value":"bob"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == COUNT / DUMP / STATS Endpoint Tests ==

#[tokio::test]
async fn test_count_and_dump_endpoints() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/set", r#"{"key":"a","value":"1"}"#))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request("POST", "/append", r#"{"key":"b","value":"2"}"#))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/count"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);

    let response = app
        .oneshot(empty_request("POST", "/dump"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["entries"], 2);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            r#"{"key":"stats_key","value":"stats_value"}"#,
        ))
        .await
        .unwrap();

    // Hit
    app.clone()
        .oneshot(empty_request("GET", "/get/stats_key"))
        .await
        .unwrap();

    // Miss
    app.clone()
        .oneshot(empty_request("GET", "/get/nonexistent"))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("GET", "/stats"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
    assert!(json.get("sweeps").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/set", r#"{"invalid json"#))
        .await
        .unwrap();

    // Axum rejects malformed JSON with 400 or 422 depending on the failure
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/set", r#"{"key":"","value":"test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == TTL Expiration via API Tests ==

#[tokio::test(start_paused = true)]
async fn test_ttl_expiration_via_api() {
    let app = create_app_with_ttl(Duration::from_secs(1));

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            r#"{"key":"ttl_test","value":"expires_soon"}"#,
        ))
        .await
        .unwrap();

    let get_response = app
        .clone()
        .oneshot(empty_request("GET", "/get/ttl_test"))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let get_response = app
        .oneshot(empty_request("GET", "/get/ttl_test"))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

// == Real Socket Test ==

#[tokio::test]
async fn test_server_over_tcp() {
    let state = AppState::new(TtlCache::new(Duration::from_secs(60)));
    let cache = state.cache.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let response = client
        .put(format!("{}/set", base))
        .json(&json!({ "key": "remote", "value": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let json: Value = client
        .get(format!("{}/get/remote", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["value"], "hello");

    server.abort();
    cache.close().await;
}
