//! The shared, static description of the walker service.
//!
//! The wire format is positional: neither arguments nor results carry field
//! names, so the order declared here is part of each operation's identity.
//! Both the client and the axum binding read their positions from
//! [`WALKER_SCHEMA`], and both validate arity and JSON kinds against it before
//! handing values on.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RpcError, RpcResult};
use crate::utils::constants::{DEFAULT_ENDPOINT, SERVICE_NAME};

/// JSON kind accepted at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    /// A JSON object (record).
    Object,
    /// A JSON array. `null` is accepted for an empty list.
    Array,
    /// An integral JSON number.
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON boolean.
    Bool,
    /// No constraint.
    Any,
}

impl WireKind {
    /// Whether `value` is of this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            WireKind::Object => value.is_object(),
            WireKind::Array => value.is_array() || value.is_null(),
            WireKind::Integer => value.is_i64() || value.is_u64(),
            WireKind::Number => value.is_number(),
            WireKind::String => value.is_string(),
            WireKind::Bool => value.is_boolean(),
            WireKind::Any => true,
        }
    }

    /// Lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            WireKind::Object => "object",
            WireKind::Array => "array",
            WireKind::Integer => "integer",
            WireKind::Number => "number",
            WireKind::String => "string",
            WireKind::Bool => "bool",
            WireKind::Any => "any",
        }
    }
}

/// Name of the JSON kind of `value`, for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A named position in an argument list or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name the client gives this position.
    pub name: &'static str,
    /// Kind the position must have.
    pub kind: WireKind,
}

impl FieldSpec {
    /// Declare a position.
    pub const fn new(name: &'static str, kind: WireKind) -> Self {
        Self { name, kind }
    }
}

/// Argument and result order of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSchema {
    /// Operation name as it appears in the request path.
    pub name: &'static str,
    /// Arguments in declared order.
    pub args: &'static [FieldSpec],
    /// Result fields in declared order.
    pub results: &'static [FieldSpec],
}

/// All operations served under one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSchema {
    /// Service name.
    pub name: &'static str,
    /// Endpoint path the service is served under by default.
    pub default_endpoint: &'static str,
    /// Operations, unique by name.
    pub operations: &'static [OperationSchema],
}

/// `GetResults(filters, page, pageSize) -> (filterOptions, results, numPages)`
pub const GET_RESULTS: OperationSchema = OperationSchema {
    name: "GetResults",
    args: &[
        FieldSpec::new("filters", WireKind::Object),
        FieldSpec::new("page", WireKind::Integer),
        FieldSpec::new("pageSize", WireKind::Integer),
    ],
    results: &[
        FieldSpec::new("filterOptions", WireKind::Object),
        FieldSpec::new("results", WireKind::Array),
        FieldSpec::new("numPages", WireKind::Integer),
    ],
};

/// `GetStatus() -> (serviceStatus)`
pub const GET_STATUS: OperationSchema = OperationSchema {
    name: "GetStatus",
    args: &[],
    results: &[FieldSpec::new("serviceStatus", WireKind::Object)],
};

/// The walker service.
pub static WALKER_SCHEMA: ServiceSchema = ServiceSchema {
    name: SERVICE_NAME,
    default_endpoint: DEFAULT_ENDPOINT,
    operations: &[GET_RESULTS, GET_STATUS],
};

impl ServiceSchema {
    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&OperationSchema> {
        self.operations.iter().find(|op| op.name == name)
    }
}

impl OperationSchema {
    /// Check an outgoing argument list against the declared arguments.
    pub fn check_args(&self, args: &[Value]) -> RpcResult<()> {
        check_positions(self.name, self.args, args)
    }

    /// Validate an incoming argument list and prepare it for decoding.
    pub fn decode_args(&self, body: Value) -> RpcResult<Positional> {
        let values = expect_array(self.name, "arguments", body)?;
        check_positions(self.name, self.args, &values)?;
        Ok(Positional::new(self.name, self.args, values))
    }

    /// Validate a positional response and prepare it for decoding.
    ///
    /// The response must be an array of exactly the declared arity; a short
    /// or long response is a decode failure, never a partial result.
    pub fn check_response(&self, response: Value) -> RpcResult<Positional> {
        let values = expect_array(self.name, "response", response)?;
        check_positions(self.name, self.results, &values)?;
        Ok(Positional::new(self.name, self.results, values))
    }

    /// Build a positional response from result values in declared order.
    pub fn encode_results(&self, values: Vec<Value>) -> RpcResult<Value> {
        check_positions(self.name, self.results, &values)?;
        Ok(Value::Array(values))
    }

    /// Declared result names in order.
    pub fn result_names(&self) -> Vec<&'static str> {
        self.results.iter().map(|f| f.name).collect()
    }
}

fn expect_array(operation: &str, what: &str, value: Value) -> RpcResult<Vec<Value>> {
    match value {
        Value::Array(values) => Ok(values),
        other => Err(RpcError::decode(
            operation,
            what,
            format!("expected a positional array, got {}", kind_of(&other)),
        )),
    }
}

fn check_positions(operation: &str, specs: &[FieldSpec], values: &[Value]) -> RpcResult<()> {
    if specs.len() != values.len() {
        return Err(RpcError::Arity {
            operation: operation.to_string(),
            expected: specs.len(),
            actual: values.len(),
        });
    }
    for (spec, value) in specs.iter().zip(values) {
        if !spec.kind.accepts(value) {
            return Err(RpcError::decode(
                operation,
                spec.name,
                format!("expected {}, got {}", spec.kind.as_str(), kind_of(value)),
            ));
        }
    }
    Ok(())
}

/// Schema-checked positional values, consumed in declared order.
#[derive(Debug)]
pub struct Positional {
    operation: &'static str,
    specs: &'static [FieldSpec],
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl Positional {
    fn new(operation: &'static str, specs: &'static [FieldSpec], values: Vec<Value>) -> Self {
        Self {
            operation,
            specs,
            values: values.into_iter(),
            index: 0,
        }
    }

    /// Decode the next position into its typed field.
    pub fn next_field<T: DeserializeOwned>(&mut self) -> RpcResult<T> {
        let field = self
            .specs
            .get(self.index)
            .map(|spec| spec.name)
            .unwrap_or("<extra>");
        let value = self.values.next().ok_or_else(|| RpcError::Arity {
            operation: self.operation.to_string(),
            expected: self.specs.len(),
            actual: self.index,
        })?;
        self.index += 1;
        serde_json::from_value(value)
            .map_err(|e| RpcError::decode(self.operation, field, e.to_string()))
    }
}
