//! Error types for positional RPC calls against the walker service.
//!
//! Every failure is returned through [`RpcResult`]; no layer turns a failed
//! call into data. The variants fall into three groups:
//! - transport failures (the round trip itself failed)
//! - decode failures (the body is not JSON, or does not match the schema)
//! - server-side rejections used by the axum binding

/// Unified error type for client and server sides of the walker RPC protocol.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RpcError {
    // -- Transport failures --
    /// Connection failed, request could not be sent, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Non-2xx HTTP status with the response body.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    // -- Decode failures --
    /// The response body is not valid JSON.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// Parser error message.
        message: String,
        /// The raw body that failed to parse (empty when unavailable).
        body: String,
    },

    /// The positional response or argument list has the wrong length.
    #[error("{operation}: expected {expected} positional values, got {actual}")]
    Arity {
        /// Operation name.
        operation: String,
        /// Arity declared by the schema.
        expected: usize,
        /// Arity actually received.
        actual: usize,
    },

    /// A positional value does not match the declared field.
    #[error("{operation}: cannot decode field '{field}': {message}")]
    Decode {
        /// Operation name.
        operation: String,
        /// Declared field name at the offending position.
        field: String,
        /// What went wrong.
        message: String,
    },

    // -- Server-side rejections --
    /// The operation is not part of the service schema.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Arguments were well-formed but semantically invalid.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The service implementation failed.
    #[error("Service error: {0}")]
    Service(String),

    /// Catch-all for errors that don't fit other categories.
    #[error("{0}")]
    Other(String),
}

/// Convenience result type for walker RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

impl RpcError {
    /// Create an `InvalidJson` error without a retained body.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::InvalidJson {
            message: message.into(),
            body: String::new(),
        }
    }

    /// Create a `Decode` error for a named field of an operation.
    pub fn decode(
        operation: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            operation: operation.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the network round trip itself failed.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            RpcError::Transport(_) | RpcError::Timeout(_) | RpcError::Http { .. }
        )
    }

    /// True when a response arrived but could not be turned into the declared result.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            RpcError::InvalidJson { .. } | RpcError::Arity { .. } | RpcError::Decode { .. }
        )
    }

    /// HTTP status the server binding answers with when it reports this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RpcError::UnknownOperation(_) => 404,
            RpcError::InvalidJson { .. }
            | RpcError::Arity { .. }
            | RpcError::Decode { .. }
            | RpcError::InvalidParams(_) => 400,
            RpcError::Http { status, .. } => *status,
            RpcError::Timeout(_) => 504,
            RpcError::Transport(_) => 502,
            RpcError::Service(_) | RpcError::Other(_) => 500,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::invalid_json(err.to_string())
    }
}
