//! Integration tests exercising `IntelClient` against an in-process HTTP server.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;
use chainintel_api::{ApiConfig, IntelClient, RateLimitInfo};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn spawn_server(app: Router) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    });
    tokio::spawn(async move {
        let _ = server.await;
    });
    (format!("http://{addr}"), shutdown_tx)
}

fn client_for(base_url: &str) -> IntelClient {
    let config = ApiConfig::new("test-key-12345", base_url, Duration::from_secs(5))
        .expect("valid config");
    IntelClient::new(config).expect("client")
}

async fn echo_handler(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> axum::Json<Value> {
    axum::Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query().unwrap_or(""),
        "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    }))
}

#[tokio::test]
async fn get_carries_bearer_auth_and_query_params() {
    let app = Router::new().route("/{*path}", any(echo_handler));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let params = vec![
        ("address".to_string(), "0xabc".to_string()),
        ("network".to_string(), "ethereum".to_string()),
    ];
    let resp = client.get("/v1/address", &params).await.expect("success");

    assert_eq!(resp.data["method"], "GET");
    assert_eq!(resp.data["path"], "/v1/address");
    assert_eq!(resp.data["authorization"], "Bearer test-key-12345");
    let query = resp.data["query"].as_str().unwrap_or_default();
    assert!(query.contains("address=0xabc"));
    assert!(query.contains("network=ethereum"));
    assert!(resp.rate_limit.is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn post_sends_json_body() {
    let app = Router::new().route("/{*path}", any(echo_handler));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let body = json!({"from": "0xabc", "to": "0xdef"});
    let resp = client
        .post("/simulate/transaction", &body, &[])
        .await
        .expect("success");

    assert_eq!(resp.data["method"], "POST");
    let echoed: Value =
        serde_json::from_str(resp.data["body"].as_str().expect("body echoed")).expect("json body");
    assert_eq!(echoed["from"], "0xabc");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn put_and_delete_share_the_normalization_path() {
    let app = Router::new().route("/{*path}", any(echo_handler));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let resp = client.put("/v1/thing", &json!({"a": 1})).await.expect("put");
    assert_eq!(resp.data["method"], "PUT");

    let resp = client.delete("/v1/thing").await.expect("delete");
    assert_eq!(resp.data["method"], "DELETE");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn rate_limit_headers_are_extracted_when_both_present() {
    async fn limited() -> impl IntoResponse {
        (
            [
                ("x-ratelimit-remaining", "99"),
                ("x-ratelimit-reset", "1700000000"),
            ],
            axum::Json(json!({"ok": true})),
        )
    }
    async fn partial() -> impl IntoResponse {
        ([("x-ratelimit-remaining", "99")], axum::Json(json!({"ok": true})))
    }

    let app = Router::new()
        .route("/limited", get(limited))
        .route("/partial", get(partial));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let resp = client.get("/limited", &[]).await.expect("success");
    assert_eq!(
        resp.rate_limit,
        Some(RateLimitInfo {
            remaining: 99,
            reset_epoch_seconds: 1_700_000_000,
        })
    );

    let resp = client.get("/partial", &[]).await.expect("success");
    assert!(resp.rate_limit.is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn http_401_normalizes_to_auth_error_with_request_id() {
    async fn unauthorized() -> impl IntoResponse {
        (
            StatusCode::UNAUTHORIZED,
            [("x-request-id", "req-abc-123")],
            axum::Json(json!({"error": "invalid key"})),
        )
    }

    let app = Router::new().route("/v1/address/balance", get(unauthorized));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let err = client
        .get("/v1/address/balance", &[])
        .await
        .expect_err("must fail");

    assert_eq!(err.code, "HTTP_401");
    assert!(err.message.contains("Authentication failed"));
    assert_eq!(err.request_id.as_deref(), Some("req-abc-123"));
    assert_eq!(err.details, Some(json!({"error": "invalid key"})));
    assert!(!err.is_retryable());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn http_503_is_retryable() {
    async fn unavailable() -> impl IntoResponse {
        (StatusCode::SERVICE_UNAVAILABLE, axum::Json(json!({})))
    }

    let app = Router::new().route("/v1/address", get(unavailable));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let err = client.get("/v1/address", &[]).await.expect_err("must fail");

    assert_eq!(err.code, "HTTP_503");
    assert!(err.message.contains("temporarily unavailable"));
    assert!(err.is_retryable());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unknown_status_uses_body_provided_message() {
    async fn teapot() -> impl IntoResponse {
        (
            StatusCode::IM_A_TEAPOT,
            axum::Json(json!({"message": "short and stout"})),
        )
    }

    let app = Router::new().route("/v1/address", get(teapot));
    let (base_url, shutdown) = spawn_server(app).await;

    let client = client_for(&base_url);
    let err = client.get("/v1/address", &[]).await.expect_err("must fail");

    assert_eq!(err.code, "HTTP_418");
    assert_eq!(err.message, "short and stout");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unreachable_server_normalizes_to_network_error() {
    // Bind a port, then drop the listener so connections are refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    let err = client.get("/v1/address", &[]).await.expect_err("must fail");

    assert_eq!(err.code, "NETWORK_ERROR");
    assert!(err.message.contains("Unable to reach"));
    assert!(err.details.is_none());
    assert!(err.is_retryable());
}
