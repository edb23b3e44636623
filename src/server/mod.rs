//! Walker server binding — serve the walker schema from Rust.
//!
//! - [`WalkerService`] trait — implement the backend operations
//! - [`InMemoryResults`] — in-memory results store implementing the trait
//! - [`walker_router`] — ready-made axum routes for the positional protocol
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use walker_rpc::server::{walker_router, InMemoryResults};
//!
//! let results = Arc::new(InMemoryResults::new("https://example.com"));
//! let app = walker_router(results.clone());
//!
//! // Feed results from the crawler as they arrive:
//! results.insert_result(scrape_result).await;
//! ```

pub mod axum_integration;
pub mod results;
pub mod service;

pub use axum_integration::{walker_router, walker_router_at, with_cors};
pub use results::{filter_options, matches, InMemoryResults};
pub use service::WalkerService;
