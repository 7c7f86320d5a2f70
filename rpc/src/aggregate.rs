//! Concurrent multi-node, multi-method aggregation
//!
//! Fans one single-attempt call out to every endpoint/method pair and
//! collects whatever comes back. A slow or dead node only nulls its own
//! cells; it never blocks or cancels the sibling calls.

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::client::RpcClient;

/// Aggregation outcome for one endpoint. The aggregate output always has
/// one snapshot per configured endpoint, in input order; methods that
/// failed map to `None` and serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub endpoint: String,
    pub results: HashMap<String, Option<Value>>,
}

impl NodeSnapshot {
    /// Result for one method; a failed or unrequested method reads as `None`.
    pub fn result(&self, method: &str) -> Option<&Value> {
        self.results.get(method).and_then(|value| value.as_ref())
    }
}

impl RpcClient {
    /// Query every method on every endpoint concurrently, one attempt per
    /// cell, no retries and no short-circuiting between cells.
    pub async fn aggregate(&self, endpoints: &[String], methods: &[String]) -> Vec<NodeSnapshot> {
        let snapshots = endpoints.iter().map(|endpoint| async move {
            let cells = join_all(methods.iter().map(|method| async move {
                let value = match self.call_once(endpoint, method, json!({})).await {
                    Ok(result) => Some(result),
                    Err(cause) => {
                        warn!(endpoint = %endpoint, method = %method, error = %cause, "aggregation call failed");
                        None
                    }
                };
                (method.clone(), value)
            }))
            .await;
            NodeSnapshot {
                endpoint: endpoint.clone(),
                results: cells.into_iter().collect(),
            }
        });
        join_all(snapshots).await
    }
}
