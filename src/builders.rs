//! Builder for ergonomic construction of walker clients.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::{
    resolve_endpoint, ClientFactory, HttpTransport, ServiceDescriptor, TransportConfig,
};
use crate::config::ClientConfig;

/// Builder for service clients with fluent configuration.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use walker_rpc::builders::ClientBuilder;
/// use walker_rpc::client::ServiceClient;
///
/// let client: ServiceClient = ClientBuilder::new("http://localhost:8080")
///     .with_prefix("/staging")
///     .with_timeout(Duration::from_secs(10))
///     .with_header("X-Dashboard", "1")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    endpoint: Option<String>,
    prefix: Option<String>,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ClientBuilder {
    /// Create a new client builder for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: None,
            prefix: None,
            timeout: None,
            headers: HashMap::new(),
        }
    }

    /// Start from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            timeout: config.timeout(),
            base_url: config.base_url,
            endpoint: config.endpoint,
            prefix: config.prefix,
            headers: config.headers,
        }
    }

    /// Replace the service's default endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Prefix the service's default endpoint.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a custom HTTP header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    fn factory(&self) -> ClientFactory {
        let config = TransportConfig {
            timeout: self.timeout,
            headers: self.headers.clone(),
        };
        ClientFactory::with_config(self.base_url.clone(), config)
    }

    /// Resolved endpoint path for client type `C`.
    pub fn endpoint_for<C: ServiceDescriptor>(&self) -> String {
        resolve_endpoint(
            C::DEFAULT_ENDPOINT,
            self.endpoint.as_deref(),
            self.prefix.as_deref(),
        )
    }

    /// Build just the transport for client type `C`.
    pub fn build_transport<C: ServiceDescriptor>(&self) -> HttpTransport {
        self.factory().build_transport(&self.endpoint_for::<C>())
    }

    /// Build a client of type `C` with its own transport.
    pub fn build<C: ServiceDescriptor>(self) -> C {
        self.factory()
            .build(self.endpoint.as_deref(), self.prefix.as_deref())
    }
}
