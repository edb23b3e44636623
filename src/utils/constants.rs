//! Constants for well-known names and paths of the walker service.

/// Name of the walker service.
pub const SERVICE_NAME: &str = "walker";

/// Endpoint path the walker service is served under by default.
pub const DEFAULT_ENDPOINT: &str = "/service/walker";

/// Content type of every request and response body.
pub const JSON_CONTENT_TYPE: &str = "application/json";
