//! Walker client — call the walker service from Rust.
//!
//! - [`ServiceClient`] — typed methods for every walker operation
//! - [`ClientFactory`] / [`ServiceDescriptor`] — endpoint resolution and client construction
//! - [`Transport`] / [`HttpTransport`] — pluggable transport layer
//!
//! # Quick Start
//!
//! ```no_run
//! use walker_rpc::client::{ClientFactory, ServiceClient};
//! use walker_rpc::types::Filters;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client: ServiceClient = ClientFactory::new("http://localhost:8080").async_client(None);
//!
//! let page = client.get_results(&Filters::new().with_prefix("http://example.com/"), 0, 50).await?;
//! for result in &page.results {
//!     println!("{} {}", result.code, result.target_url);
//! }
//! # Ok(())
//! # }
//! ```

mod factory;
mod service_client;
mod transport;

pub use factory::{resolve_endpoint, ClientFactory, ServiceDescriptor};
pub use service_client::ServiceClient;
pub use transport::{operation_url, HttpTransport, Transport, TransportConfig};
