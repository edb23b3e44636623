//! # walker-rpc — typed client and server bindings for the walker service
//!
//! The walker service answers queries about a crawl: which URLs were scraped,
//! with what status, how fast, and what they link to. It speaks a positional
//! JSON protocol: each operation is a `POST {endpoint}/{operation}` whose
//! body is a JSON array of arguments and whose response is a JSON array of
//! result fields. No field names travel on the wire, so both ends read the
//! order from one shared [`schema`].
//!
//! This crate provides:
//! - **Value objects** for everything on the wire ([`types`])
//! - **The schema** with runtime validation of arity and kinds ([`schema`])
//! - **Client** with typed methods per operation ([`client::ServiceClient`])
//! - **Server** binding for axum ([`server::walker_router`])
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `client` | yes     | HTTP client for calling the walker service (reqwest) |
//! | `server` | yes     | Service trait + axum router serving the schema |
//! | `full`   | no      | Enable all features |
//!
//! ## Quick Start: Client
//!
//! ```no_run
//! use walker_rpc::builders::ClientBuilder;
//! use walker_rpc::client::ServiceClient;
//! use walker_rpc::types::Filters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client: ServiceClient = ClientBuilder::new("http://localhost:8080").build();
//!
//!     let status = client.get_status().await?;
//!     println!("{}: {} done, {} open", status.target_url, status.done, status.open);
//!
//!     let page = client
//!         .get_results(&Filters::new().with_status([404]), 0, 100)
//!         .await?;
//!     for result in page.results {
//!         println!("{} {}", result.code, result.target_url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`RpcResult`]. Network failures, non-2xx statuses,
//! unparseable bodies and responses that do not match the schema are all
//! [`RpcError`] values; none of them is ever returned as data. Use
//! [`RpcError::is_transport_failure`] and [`RpcError::is_decode_failure`] to
//! tell them apart.
//!
//! ## Concurrency
//!
//! Calls are independent round trips with no ordering guarantee between
//! them, no cancellation and, unless configured, no timeout. A caller that
//! fires a page change and then a filter change must discard stale responses
//! itself.

pub mod config;
pub mod error;
pub mod schema;
pub mod types;
pub mod utils;

#[cfg(feature = "client")]
pub mod builders;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;

/// Prelude module that re-exports commonly used types and traits.
///
/// ```
/// use walker_rpc::prelude::*;
///
/// let filters = Filters::new().with_prefix("https://example.com/");
/// assert!(WALKER_SCHEMA.operation("GetResults").is_some());
/// # let _ = filters;
/// ```
pub mod prelude {
    pub use crate::types::{
        FilterOptions, Filters, GetResultsResponse, Heading, LinkList, LinkedData, ScrapeResult,
        ServiceStatus, StatusStats, Structure,
    };

    pub use crate::error::{RpcError, RpcResult};
    pub use crate::schema::WALKER_SCHEMA;

    #[cfg(feature = "client")]
    pub use crate::builders::ClientBuilder;

    #[cfg(feature = "client")]
    pub use crate::client::{ClientFactory, ServiceClient, ServiceDescriptor, Transport};

    #[cfg(feature = "server")]
    pub use crate::server::{walker_router, InMemoryResults, WalkerService};
}

// Re-export core types at crate root for convenience.
pub use error::{RpcError, RpcResult};
pub use types::*;

#[cfg(feature = "client")]
pub use builders::ClientBuilder;
