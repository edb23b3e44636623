//! Transport layer for walker RPC calls.
//!
//! Provides the [`Transport`] trait, which performs one round trip for one
//! named operation with positional arguments, and [`HttpTransport`], the
//! standard binding: `POST {endpoint}/{operation}` with a JSON array body.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn, Instrument};

use crate::error::{RpcError, RpcResult};
use crate::utils::constants::JSON_CONTENT_TYPE;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the request URL for `operation` under `endpoint`.
///
/// The operation name is percent-encoded as a single path segment, so
/// reserved characters (`/`, `?`, `#`, spaces, ...) never change the path
/// structure.
///
/// ```
/// use walker_rpc::client::operation_url;
///
/// assert_eq!(
///     operation_url("http://host/service/walker", "Get Status"),
///     "http://host/service/walker/Get%20Status",
/// );
/// ```
pub fn operation_url(endpoint: &str, operation: &str) -> String {
    format!(
        "{}/{}",
        endpoint,
        utf8_percent_encode(operation, URI_COMPONENT)
    )
}

/// One network round trip per call.
///
/// Implementations serialize whatever arguments they are given; arity and
/// kinds are the caller's concern. Every failure is returned as an
/// [`RpcError`], never as a value.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call `operation` with positional `args` and return the decoded JSON body.
    async fn call(&self, operation: &str, args: Vec<Value>) -> RpcResult<Value>;

    /// The endpoint this transport is bound to.
    fn endpoint(&self) -> &str;
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Request timeout. `None` (the default) waits indefinitely.
    pub timeout: Option<Duration>,
    /// Additional HTTP headers to include on every request.
    pub headers: HashMap<String, String>,
}

/// JSON over HTTP transport using `reqwest`.
///
/// # Example
///
/// ```no_run
/// use walker_rpc::client::HttpTransport;
///
/// let transport = HttpTransport::new("http://localhost:8080/service/walker");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport bound to an absolute endpoint URL with default configuration.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(endpoint, TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    pub fn with_config(endpoint: impl Into<String>, config: TransportConfig) -> Self {
        let mut default_headers = HeaderMap::new();
        for (key, value) in &config.headers {
            if let (Ok(name), Ok(val)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                default_headers.insert(name, val);
            } else {
                warn!(header = %key, "skipping invalid header");
            }
        }

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "failed to build configured HTTP client, using defaults");
            reqwest::Client::new()
        });

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a transport with an existing `reqwest::Client`.
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn round_trip(&self, url: &str, args: &[Value]) -> RpcResult<Value> {
        let body = serde_json::to_vec(args)
            .map_err(|e| RpcError::Other(format!("failed to serialize arguments: {e}")))?;

        debug!("fetching");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcError::Timeout(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    RpcError::Transport(format!("connection failed: {e}"))
                } else {
                    RpcError::Transport(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(RpcError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => Err(RpcError::InvalidJson {
                message: e.to_string(),
                body: text,
            }),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, operation: &str, args: Vec<Value>) -> RpcResult<Value> {
        let url = operation_url(&self.endpoint, operation);
        let call_id = uuid::Uuid::new_v4();
        let span = tracing::debug_span!("rpc_call", %operation, %url, %call_id);

        async {
            let result = self.round_trip(&url, &args).await;
            if let Err(err) = &result {
                match err {
                    RpcError::InvalidJson { body, .. } => {
                        warn!(error = %err, last_response = %body, "call failed");
                    }
                    _ => warn!(error = %err, "call failed"),
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
