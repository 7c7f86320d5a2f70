//! Resilient JSON-RPC client for Salvium daemon nodes.
//!
//! The crate centers on a stateless [`RpcClient`] that issues JSON-RPC 2.0
//! calls over HTTP POST and layers three behaviors on top of the raw
//! transport:
//!
//! - bounded retries with exponential backoff and jitter against a single
//!   endpoint ([`client`]),
//! - sequential, priority-ordered failover across a list of endpoints
//!   ([`failover`]),
//! - a concurrent aggregator that fans one-shot calls out to every
//!   endpoint/method pair and tolerates partial failure ([`aggregate`]).
//!
//! Callers only ever observe [`RpcClientError::Exhausted`] (single-endpoint
//! calls) or [`RpcClientError::AllEndpointsFailed`] (failover); individual
//! attempt failures are retried internally and logged at debug/warn level.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod failover;
pub mod types;

pub use aggregate::NodeSnapshot;
pub use client::RpcClient;
pub use config::RetryConfig;
pub use error::{EndpointFailure, Result, RpcClientError};
