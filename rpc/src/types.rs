//! JSON-RPC wire types and typed Salvium responses

use serde::{Deserialize, Serialize};

/// Method names exposed by the Salvium daemon that this crate consumes.
pub const GET_INFO: &str = "get_info";
pub const GET_SUPPLY_INFO: &str = "get_supply_info";
pub const GET_YIELD_INFO: &str = "get_yield_info";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    /// The daemon echoes this back; a string id matches what salvium
    /// tooling sends.
    pub id: String,
    pub method: String,
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: "0".to_string(),
            method: method.to_string(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
///
/// Exactly one of `result` and `error` should be present. A present
/// `error` is authoritative: the client treats it as a failure even if a
/// `result` is also present.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// Server-reported error object inside a JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Fields consumed from a `get_info` result.
///
/// The daemon returns more fields than these; unknown ones are ignored and
/// missing ones default so that older daemons still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkInfo {
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub already_generated_coins: u64,
    #[serde(default)]
    pub base_reward: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub mainnet: bool,
    /// Target block time in seconds; drives the hashrate estimate.
    #[serde(default)]
    pub target: u64,
}
