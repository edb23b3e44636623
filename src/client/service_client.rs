//! Typed client for the walker service.
//!
//! Each method packs its arguments in the order the schema declares, calls
//! the transport, validates the positional response against the schema and
//! names the fields.

use serde::Serialize;
use serde_json::Value;

use crate::error::{RpcError, RpcResult};
use crate::schema::{OperationSchema, GET_RESULTS, GET_STATUS};
use crate::types::{Filters, GetResultsResponse, ScrapeResult, ServiceStatus};
use crate::utils::constants::DEFAULT_ENDPOINT;

use super::factory::ServiceDescriptor;
use super::transport::{HttpTransport, Transport};

/// Client for the walker service.
///
/// Owns exactly one transport. Calls are independent: two calls in flight
/// are two round trips, with no coalescing, caching or ordering between
/// them. Callers that need the latest request to win must sequence requests
/// themselves.
///
/// # Example
///
/// ```no_run
/// use walker_rpc::client::ServiceClient;
/// use walker_rpc::types::Filters;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ServiceClient::from_endpoint("http://localhost:8080/service/walker");
/// let status = client.get_status().await?;
/// println!("{} done, {} pending", status.done, status.pending);
///
/// let page = client.get_results(&Filters::new(), 0, 100).await?;
/// println!("{} results on page 1 of {}", page.results.len(), page.num_pages);
/// # Ok(())
/// # }
/// ```
pub struct ServiceClient {
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.transport.endpoint())
            .finish_non_exhaustive()
    }
}

impl ServiceDescriptor for ServiceClient {
    const DEFAULT_ENDPOINT: &'static str = DEFAULT_ENDPOINT;

    fn from_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_transport(transport)
    }
}

impl ServiceClient {
    /// Endpoint path the walker service is served under by default.
    pub const DEFAULT_ENDPOINT: &'static str = DEFAULT_ENDPOINT;

    /// Create a client around a custom transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client bound to an absolute endpoint URL.
    pub fn from_endpoint(url: &str) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(url)))
    }

    /// The endpoint of the underlying transport.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Fetch one page of results (`GetResults`).
    ///
    /// Positions: `filterOptions`, `results`, `numPages`.
    pub async fn get_results(
        &self,
        filters: &Filters,
        page: i64,
        page_size: i64,
    ) -> RpcResult<GetResultsResponse> {
        let args = build_args(
            &GET_RESULTS,
            vec![to_arg(filters)?, Value::from(page), Value::from(page_size)],
        )?;
        let response = self.transport.call(GET_RESULTS.name, args).await?;

        let mut fields = GET_RESULTS.check_response(response)?;
        let filter_options = fields.next_field()?;
        let results: Option<Vec<ScrapeResult>> = fields.next_field()?;
        let num_pages = fields.next_field()?;

        Ok(GetResultsResponse {
            filter_options,
            results: results.unwrap_or_default(),
            num_pages,
        })
    }

    /// Fetch crawl progress (`GetStatus`).
    ///
    /// The one-element positional response is unwrapped to the status itself.
    pub async fn get_status(&self) -> RpcResult<ServiceStatus> {
        let args = build_args(&GET_STATUS, Vec::new())?;
        let response = self.transport.call(GET_STATUS.name, args).await?;
        GET_STATUS.check_response(response)?.next_field()
    }
}

// ──────────────────────────────────────────────────
// Internal helpers
// ──────────────────────────────────────────────────

fn to_arg(value: &impl Serialize) -> RpcResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::Other(format!("failed to serialize argument: {e}")))
}

/// Check packed arguments against the operation before dispatch.
fn build_args(operation: &OperationSchema, args: Vec<Value>) -> RpcResult<Vec<Value>> {
    operation.check_args(&args)?;
    Ok(args)
}
