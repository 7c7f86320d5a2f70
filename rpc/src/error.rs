//! Error types for the resilient RPC client
//!
//! A closed set of tagged variants with structured fields, so callers can
//! branch on kind instead of parsing message text. Transport, parse and
//! server-reported RPC failures are all retryable; `Exhausted` and
//! `AllEndpointsFailed` are the only variants that cross the crate
//! boundary from `call` and `call_with_failover` respectively.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, RpcClientError>;

#[derive(Debug, Error)]
pub enum RpcClientError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to initialize HTTP client: {message}")]
    Init { message: String },

    /// Connection, DNS or TLS failure, or a non-success HTTP status.
    #[error("transport failure contacting {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The response body was not a valid JSON-RPC envelope. Carries the
    /// raw text so non-JSON error pages show up in diagnostics.
    #[error("invalid JSON-RPC response from {endpoint}: {body}")]
    Parse { endpoint: String, body: String },

    /// The daemon returned a well-formed response with an `error` object.
    #[error("{endpoint} reported RPC error {code}: {message}")]
    Rpc {
        endpoint: String,
        code: i64,
        message: String,
    },

    /// Every attempt against one endpoint failed.
    #[error("{method} on {endpoint} failed after {attempts} attempts: {last}")]
    Exhausted {
        endpoint: String,
        method: String,
        attempts: u32,
        last: Box<RpcClientError>,
    },

    /// Every configured endpoint reached `Exhausted`.
    #[error("all {} endpoints failed", .causes.len())]
    AllEndpointsFailed { causes: Vec<EndpointFailure> },
}

/// Terminal failure record for one endpoint in a failover sequence,
/// kept in endpoint (priority) order.
#[derive(Debug)]
pub struct EndpointFailure {
    pub endpoint: String,
    pub cause: RpcClientError,
}
