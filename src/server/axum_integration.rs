//! Axum integration — serve the walker schema over HTTP.
//!
//! [`walker_router`] creates an axum `Router` with one route,
//! `POST {endpoint}/{operation}`. The body is the positional argument array;
//! the response is the positional result array. Arguments and results are
//! checked against [`WALKER_SCHEMA`], the same schema the client uses.
//!
//! | Status | When |
//! |--------|------|
//! | `200` | JSON array of results in declared order |
//! | `400` | body is not JSON, or arity/kind mismatch against the schema |
//! | `404` | operation not in the schema |
//! | `500` | the service failed |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use walker_rpc::server::{walker_router, with_cors, InMemoryResults};
//!
//! let results = Arc::new(InMemoryResults::new("https://example.com"));
//! let app = with_cors(walker_router(results));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::error::{RpcError, RpcResult};
use crate::schema::{OperationSchema, GET_RESULTS, GET_STATUS, WALKER_SCHEMA};
use crate::types::Filters;

use super::service::WalkerService;

/// Shared state for the axum routes.
struct AppState {
    service: Arc<dyn WalkerService>,
}

/// Create a router serving `service` at the default endpoint (`/service/walker`).
pub fn walker_router(service: Arc<dyn WalkerService>) -> Router {
    walker_router_at(service, WALKER_SCHEMA.default_endpoint)
}

/// Create a router serving `service` under `endpoint`.
pub fn walker_router_at(service: Arc<dyn WalkerService>, endpoint: &str) -> Router {
    let state = Arc::new(AppState { service });
    let path = format!("{}/{{operation}}", endpoint.trim_end_matches('/'));

    Router::new()
        .route(&path, post(handle_call))
        .with_state(state)
}

/// Allow the dashboard to call the service from another origin.
pub fn with_cors(router: Router) -> Router {
    router.layer(CorsLayer::permissive())
}

async fn handle_call(
    State(state): State<Arc<AppState>>,
    Path(operation): Path<String>,
    body: Bytes,
) -> Response {
    debug!(%operation, "walker call received");

    match dispatch(&state, &operation, &body).await {
        Ok(value) => Json(value).into_response(),
        Err(err) => {
            warn!(%operation, error = %err, "walker call rejected");
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.to_string()).into_response()
        }
    }
}

async fn dispatch(state: &AppState, operation: &str, body: &[u8]) -> RpcResult<Value> {
    let schema = WALKER_SCHEMA
        .operation(operation)
        .ok_or_else(|| RpcError::UnknownOperation(operation.to_string()))?;

    let args: Value = if body.is_empty() {
        Value::Array(Vec::new())
    } else {
        serde_json::from_slice(body)?
    };
    let mut args = schema.decode_args(args)?;

    match schema.name {
        name if name == GET_RESULTS.name => {
            let filters: Filters = args.next_field()?;
            let page: i64 = args.next_field()?;
            let page_size: i64 = args.next_field()?;
            let response = state.service.get_results(filters, page, page_size).await?;
            encode(
                schema,
                vec![
                    to_result(&response.filter_options)?,
                    to_result(&response.results)?,
                    Value::from(response.num_pages),
                ],
            )
        }
        name if name == GET_STATUS.name => {
            let status = state.service.get_status().await?;
            encode(schema, vec![to_result(&status)?])
        }
        name => Err(RpcError::UnknownOperation(name.to_string())),
    }
}

fn to_result(value: &impl Serialize) -> RpcResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::Service(format!("failed to serialize result: {e}")))
}

fn encode(schema: &OperationSchema, values: Vec<Value>) -> RpcResult<Value> {
    schema
        .encode_results(values)
        .map_err(|e| RpcError::Service(format!("result does not match schema: {e}")))
}
