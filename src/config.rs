//! Client configuration.
//!
//! [`ClientConfig`] is the serde-loadable form of what
//! [`ClientBuilder`](crate::builders::ClientBuilder) assembles fluently.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RpcError, RpcResult};

/// Settings for a walker client, typically loaded from a JSON file.
///
/// # Example
///
/// ```
/// use walker_rpc::config::ClientConfig;
///
/// let config = ClientConfig::from_json_str(r#"{
///     "base_url": "http://localhost:8080",
///     "prefix": "/staging",
///     "timeout_ms": 5000
/// }"#).unwrap();
/// assert_eq!(config.prefix.as_deref(), Some("/staging"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Scheme and authority the endpoint path is resolved against,
    /// e.g. `http://localhost:8080`.
    pub base_url: String,

    /// Endpoint path that replaces the service default.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Path prefix put in front of the service default endpoint.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Request timeout in milliseconds. No timeout when absent.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Additional HTTP headers sent with every call.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> RpcResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RpcError::Other(format!("invalid client config: {e}")))?;
        if config.base_url.trim().is_empty() {
            return Err(RpcError::Other(
                "invalid client config: base_url must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
