//! Aggregating stats proxy for Salvium daemon nodes.
//!
//! Fronts a set of public seed nodes, fans the dashboard's RPC methods
//! out to all of them concurrently and serves the merged result over
//! HTTP, with CORS and per-IP rate limiting.

pub mod config;
pub mod rate_limiter;
pub mod routes;
