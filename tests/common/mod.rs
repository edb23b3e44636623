//! Shared test utilities for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use walker_rpc::client::Transport;
use walker_rpc::error::{RpcError, RpcResult};
use walker_rpc::server::{walker_router, WalkerService};
use walker_rpc::types::ScrapeResult;

/// A transport that answers every call with a canned outcome and counts calls.
#[derive(Clone)]
pub struct MockTransport {
    outcome: Result<Value, RpcError>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl MockTransport {
    /// Answer every call with `response`.
    pub fn returning(response: Value) -> Self {
        Self {
            outcome: Ok(response),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every call with `error`.
    pub fn failing(error: RpcError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of calls made so far (shared across clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Operation names and arguments in call order.
    pub fn requests(&self) -> Vec<(String, Vec<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, operation: &str, args: Vec<Value>) -> RpcResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((operation.to_string(), args));
        // Yield so concurrent calls interleave.
        tokio::task::yield_now().await;
        self.outcome.clone()
    }

    fn endpoint(&self) -> &str {
        "mock://walker"
    }
}

/// A scrape result with the fields the tests care about.
pub fn sample_result(url: &str, code: i64, duration_ms: i64) -> ScrapeResult {
    ScrapeResult {
        target_url: url.to_string(),
        code,
        status: format!("{code}"),
        content_type: "text/html".to_string(),
        duration: duration_ms * 1_000_000,
        ..Default::default()
    }
}

/// Serve `router` on a random port. Returns the base URL and the server task.
pub async fn serve(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Brief wait for the server to start accepting connections.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (base_url, handle)
}

/// Start a walker server backed by `service` at the default endpoint.
pub async fn start_test_server(
    service: Arc<dyn WalkerService>,
) -> (String, tokio::task::JoinHandle<()>) {
    serve(walker_router(service)).await
}

/// Start a server that answers every call with a fixed status and body.
pub async fn start_raw_server(
    status: u16,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<()>) {
    let router = Router::new().route(
        "/service/walker/{operation}",
        post(move || async move {
            (
                StatusCode::from_u16(status).unwrap(),
                [("content-type", "application/json")],
                body,
            )
        }),
    );
    serve(router).await
}

/// Start a server that echoes what it received:
/// `{"operation": <decoded path segment>, "contentType": ..., "body": <parsed body>}`.
pub async fn start_echo_server() -> (String, tokio::task::JoinHandle<()>) {
    let router = Router::new().route(
        "/service/walker/{operation}",
        post(
            |Path(operation): Path<String>, headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                Json(json!({
                    "operation": operation,
                    "contentType": content_type,
                    "body": body,
                }))
                .into_response()
            },
        ),
    );
    serve(router).await
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
