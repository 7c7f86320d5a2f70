//! Resilient JSON-RPC client
//!
//! Sends JSON-RPC 2.0 envelopes as HTTP POST and retries transient
//! failures with exponential backoff and jitter. Transport errors,
//! non-success HTTP statuses, malformed bodies and server-reported RPC
//! errors all take the same retry path, so callers deal with a single
//! failure mode per endpoint.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::{Result, RpcClientError};
use crate::types::{RpcRequest, RpcResponse};

/// Stateless JSON-RPC client. Holds a shared `reqwest::Client`, so it is
/// cheap to clone and safe to call from concurrent tasks.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    retry: RetryConfig,
}

impl RpcClient {
    /// Client with the default retry schedule.
    pub fn new() -> Result<Self> {
        Self::with_retry(RetryConfig::default())
    }

    /// Client with a caller-supplied retry schedule. The per-attempt HTTP
    /// timeout from the config is baked into the underlying transport.
    pub fn with_retry(retry: RetryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(retry.request_timeout_ms))
            .build()
            .map_err(|e| RpcClientError::Init {
                message: e.to_string(),
            })?;
        Ok(Self { http, retry })
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Call `method` on `endpoint` with the full retry budget.
    ///
    /// Returns the `result` field of the first successful response. Fails
    /// with [`RpcClientError::Exhausted`] carrying the last underlying
    /// cause once `max_attempts` attempts have failed.
    pub async fn call(&self, endpoint: &str, method: &str, params: Value) -> Result<Value> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!(endpoint, method, attempt, max_attempts, "issuing RPC request");
            match self.attempt(endpoint, method, &params).await {
                Ok(result) => return Ok(result),
                Err(cause) if attempt < max_attempts => {
                    let delay = self.retry.backoff_delay(attempt);
                    warn!(
                        endpoint,
                        method,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %cause,
                        "RPC attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(cause) => {
                    warn!(endpoint, method, attempts = max_attempts, error = %cause, "RPC call exhausted");
                    return Err(RpcClientError::Exhausted {
                        endpoint: endpoint.to_string(),
                        method: method.to_string(),
                        attempts: max_attempts,
                        last: Box::new(cause),
                    });
                }
            }
        }
    }

    /// Exactly one attempt, no backoff. The aggregator uses this so a
    /// dead node costs one request per method, not a retry budget.
    pub async fn call_once(&self, endpoint: &str, method: &str, params: Value) -> Result<Value> {
        self.attempt(endpoint, method, &params).await
    }

    async fn attempt(&self, endpoint: &str, method: &str, params: &Value) -> Result<Value> {
        let request = RpcRequest::new(method, params.clone());

        let response = self
            .http
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcClientError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcClientError::Transport {
                endpoint: endpoint.to_string(),
                message: format!("HTTP status {status}"),
            });
        }

        // Read the body as text first so a non-JSON error page ends up in
        // the Parse variant verbatim.
        let body = response
            .text()
            .await
            .map_err(|e| RpcClientError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let envelope: RpcResponse =
            serde_json::from_str(&body).map_err(|_| RpcClientError::Parse {
                endpoint: endpoint.to_string(),
                body: body.clone(),
            })?;

        // A present error object wins even if a result is also present.
        if let Some(error) = envelope.error {
            return Err(RpcClientError::Rpc {
                endpoint: endpoint.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        match envelope.result {
            Some(result) => Ok(result),
            None => Err(RpcClientError::Parse {
                endpoint: endpoint.to_string(),
                body,
            }),
        }
    }
}
