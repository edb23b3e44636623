//! Tests for HttpTransport against real local HTTP servers.

mod common;

use std::time::Duration;

use axum::routing::post;
use axum::Router;
use common::{closed_port_url, serve, start_echo_server, start_raw_server};
use serde_json::json;
use walker_rpc::client::{HttpTransport, Transport, TransportConfig};
use walker_rpc::error::RpcError;

fn transport_for(base_url: &str) -> HttpTransport {
    HttpTransport::new(format!("{base_url}/service/walker"))
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn request_is_json_post_of_argument_array() {
    let (base_url, _h) = start_echo_server().await;
    let transport = transport_for(&base_url);

    let args = vec![
        json!({"Prefix": "", "Status": [200, 404], "MinDur": 0, "MaxDur": 0}),
        json!(0),
        json!(100),
    ];
    let echoed = transport.call("GetResults", args.clone()).await.unwrap();

    assert_eq!(echoed["operation"], "GetResults");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], json!(args));
}

#[tokio::test]
async fn empty_argument_list_is_sent_as_empty_array() {
    let (base_url, _h) = start_echo_server().await;
    let echoed = transport_for(&base_url)
        .call("GetStatus", Vec::new())
        .await
        .unwrap();
    assert_eq!(echoed["body"], json!([]));
}

#[tokio::test]
async fn operation_name_round_trips_through_percent_encoding() {
    let (base_url, _h) = start_echo_server().await;
    let transport = transport_for(&base_url);

    for name in ["Get Results", "a/b", "q?x=1&y=2", "frag#ment", "100%", "ümlaut", "plus+sign"] {
        let echoed = transport.call(name, Vec::new()).await.unwrap();
        assert_eq!(echoed["operation"], name, "operation {name:?} was altered");
    }
}

#[tokio::test]
async fn large_integers_keep_precision() {
    let (base_url, _h) = start_echo_server().await;
    let args = vec![json!(i64::MAX), json!(-9_007_199_254_740_993_i64), json!([3, 1, 2])];
    let echoed = transport_for(&base_url)
        .call("GetResults", args.clone())
        .await
        .unwrap();
    assert_eq!(echoed["body"], json!(args));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn non_success_status_is_http_error() {
    let (base_url, _h) = start_raw_server(500, "backend exploded").await;
    let err = transport_for(&base_url)
        .call("GetStatus", Vec::new())
        .await
        .unwrap_err();
    match err {
        RpcError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_body_is_invalid_json_with_body_kept() {
    let (base_url, _h) = start_raw_server(200, "<html>not json</html>").await;
    let err = transport_for(&base_url)
        .call("GetStatus", Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_decode_failure());
    match err {
        RpcError::InvalidJson { body, .. } => assert_eq!(body, "<html>not json</html>"),
        other => panic!("expected invalid JSON, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_is_invalid_json() {
    let (base_url, _h) = start_raw_server(200, "").await;
    let err = transport_for(&base_url)
        .call("GetStatus", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::InvalidJson { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let base_url = closed_port_url().await;
    let err = transport_for(&base_url)
        .call("GetStatus", Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_transport_failure());
    assert!(matches!(err, RpcError::Transport(_)));
}

#[tokio::test]
async fn configured_timeout_is_reported() {
    let router = Router::new().route(
        "/service/walker/{operation}",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "[]"
        }),
    );
    let (base_url, _h) = serve(router).await;

    let config = TransportConfig {
        timeout: Some(Duration::from_millis(100)),
        ..Default::default()
    };
    let transport = HttpTransport::with_config(format!("{base_url}/service/walker"), config);
    let err = transport.call("GetStatus", Vec::new()).await.unwrap_err();
    assert!(matches!(err, RpcError::Timeout(_)), "got {err:?}");
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn configured_headers_are_sent() {
    let router = Router::new().route(
        "/service/walker/{operation}",
        post(|headers: axum::http::HeaderMap| async move {
            let value = headers
                .get("x-dashboard")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            axum::Json(json!([value]))
        }),
    );
    let (base_url, _h) = serve(router).await;

    let config = TransportConfig {
        timeout: None,
        headers: [("X-Dashboard".to_string(), "walker".to_string())].into(),
    };
    let transport = HttpTransport::with_config(format!("{base_url}/service/walker"), config);
    let response = transport.call("GetStatus", Vec::new()).await.unwrap();
    assert_eq!(response, json!(["walker"]));
}

#[test]
fn with_client_keeps_endpoint() {
    let transport = HttpTransport::with_client("http://h/service/walker", reqwest::Client::new());
    assert_eq!(transport.endpoint(), "http://h/service/walker");
    let cloned = transport.clone();
    assert_eq!(cloned.endpoint(), "http://h/service/walker");
}
