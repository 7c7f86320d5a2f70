//! Priority-ordered failover across daemon endpoints
//!
//! Endpoints are tried strictly in the configured order; the order
//! doubles as priority and is never shuffled. Each endpoint gets the
//! client's full retry budget before the next one is contacted, so a
//! healthy primary keeps the load off the fallbacks.

use serde_json::Value;
use tracing::warn;

use crate::client::RpcClient;
use crate::error::{EndpointFailure, Result, RpcClientError};

impl RpcClient {
    /// Call `method` against each endpoint in order until one succeeds.
    ///
    /// First success wins and trailing endpoints are never contacted. If
    /// every endpoint exhausts its retries, fails with
    /// [`RpcClientError::AllEndpointsFailed`] carrying one cause per
    /// endpoint, in endpoint order.
    pub async fn call_with_failover(
        &self,
        endpoints: &[String],
        method: &str,
        params: Value,
    ) -> Result<Value> {
        let mut causes = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            match self.call(endpoint, method, params.clone()).await {
                Ok(result) => return Ok(result),
                Err(cause) => {
                    warn!(endpoint = %endpoint, method, error = %cause, "endpoint exhausted, trying next");
                    causes.push(EndpointFailure {
                        endpoint: endpoint.clone(),
                        cause,
                    });
                }
            }
        }
        Err(RpcClientError::AllEndpointsFailed { causes })
    }
}
