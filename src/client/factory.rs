//! Client factory: resolve an endpoint, bind a transport, wrap it in a client.
//!
//! Every call produces a fresh client owning a fresh transport. There is no
//! registry and no caching between calls.

use tracing::debug;

use super::transport::{HttpTransport, Transport, TransportConfig};

/// A client that can be built around a bound [`Transport`].
///
/// Implemented by every generated service client; the factory uses it to
/// construct clients without knowing their concrete type.
pub trait ServiceDescriptor: Sized {
    /// Endpoint path the service is served under by default.
    const DEFAULT_ENDPOINT: &'static str;

    /// Build a client that owns `transport`.
    fn from_transport(transport: Box<dyn Transport>) -> Self;
}

/// Pick the endpoint a client should be bound to.
///
/// An explicit override wins; otherwise the prefix (if any) is prepended to
/// the default endpoint.
///
/// ```
/// use walker_rpc::client::resolve_endpoint;
///
/// assert_eq!(resolve_endpoint("/service/walker", None, None), "/service/walker");
/// assert_eq!(resolve_endpoint("/service/walker", None, Some("/api")), "/api/service/walker");
/// assert_eq!(resolve_endpoint("/service/walker", Some("/x"), Some("/api")), "/x");
/// ```
pub fn resolve_endpoint(
    default_endpoint: &str,
    endpoint_override: Option<&str>,
    prefix: Option<&str>,
) -> String {
    match (endpoint_override, prefix) {
        (Some(endpoint), _) => endpoint.to_string(),
        (None, Some(prefix)) => format!("{prefix}{default_endpoint}"),
        (None, None) => default_endpoint.to_string(),
    }
}

/// Builds service clients bound to endpoints under one base URL.
///
/// The base URL supplies scheme and authority; endpoint paths such as
/// `/service/walker` are appended to it. An endpoint that is already an
/// absolute URL is used as is.
///
/// # Example
///
/// ```no_run
/// use walker_rpc::client::{ClientFactory, ServiceClient};
///
/// let factory = ClientFactory::new("http://localhost:8080");
/// let client: ServiceClient = factory.async_client(None);
/// let staging: ServiceClient = factory.prefixed_async_client("/staging");
/// ```
#[derive(Debug, Clone)]
pub struct ClientFactory {
    base_url: String,
    config: TransportConfig,
}

impl ClientFactory {
    /// Create a factory with default transport configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(base_url, TransportConfig::default())
    }

    /// Create a factory whose transports use `config`.
    pub fn with_config(base_url: impl Into<String>, config: TransportConfig) -> Self {
        Self {
            base_url: base_url.into(),
            config,
        }
    }

    /// The base URL endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.contains("://") {
            return endpoint.to_string();
        }
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Create a transport bound to `endpoint`.
    pub fn build_transport(&self, endpoint: &str) -> HttpTransport {
        HttpTransport::with_config(self.endpoint_url(endpoint), self.config.clone())
    }

    /// Build a client of type `C`.
    ///
    /// The endpoint is resolved with [`resolve_endpoint`] from `C`'s default.
    pub fn build<C: ServiceDescriptor>(
        &self,
        endpoint_override: Option<&str>,
        prefix: Option<&str>,
    ) -> C {
        let endpoint = resolve_endpoint(C::DEFAULT_ENDPOINT, endpoint_override, prefix);
        let transport = self.build_transport(&endpoint);
        debug!(endpoint = %transport.endpoint(), "client built");
        C::from_transport(Box::new(transport))
    }

    /// Build a client at `endpoint`, or at `C`'s default endpoint.
    pub fn async_client<C: ServiceDescriptor>(&self, endpoint: Option<&str>) -> C {
        self.build(endpoint, None)
    }

    /// Build a client at `prefix` + `C`'s default endpoint.
    pub fn prefixed_async_client<C: ServiceDescriptor>(&self, prefix: &str) -> C {
        self.build(None, Some(prefix))
    }
}
