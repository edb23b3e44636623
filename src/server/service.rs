//! The walker service contract, as implemented by a backend.

use async_trait::async_trait;

use crate::error::RpcResult;
use crate::types::{Filters, GetResultsResponse, ServiceStatus};

/// Backend side of the walker operations.
///
/// Implementations must be `Send + Sync`; the router calls them from
/// concurrent request handlers.
///
/// # Provided implementations
///
/// - [`InMemoryResults`](super::InMemoryResults) — results held in memory
#[async_trait]
pub trait WalkerService: Send + Sync {
    /// `GetResults`: one filtered, sorted page plus filter options.
    async fn get_results(
        &self,
        filters: Filters,
        page: i64,
        page_size: i64,
    ) -> RpcResult<GetResultsResponse>;

    /// `GetStatus`: crawl progress.
    async fn get_status(&self) -> RpcResult<ServiceStatus>;
}
