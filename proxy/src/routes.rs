//! HTTP routes for the stats proxy

use actix_web::{web, HttpResponse, Responder};
use salvium_rpc::types::{GET_INFO, GET_SUPPLY_INFO, GET_YIELD_INFO};
use salvium_rpc::RpcClient;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Shared state handed to the handlers.
pub struct AppState {
    pub client: RpcClient,
    /// Full `/json_rpc` endpoint URLs, in priority order.
    pub endpoints: Vec<String>,
    /// Base node URLs, aligned index-for-index with `endpoints`; these are
    /// what the response labels entries with.
    pub nodes: Vec<String>,
}

/// One entry of the `/api/stats` payload. The daemon result objects are
/// passed through raw; a failed method is `null`.
#[derive(Debug, Serialize)]
pub struct NodeStats {
    pub node: String,
    pub info: Option<Value>,
    pub supply: Option<Value>,
    pub yield_info: Option<Value>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/stats").route(web::get().to(get_stats)))
        .service(web::resource("/health").route(web::get().to(health)));
}

/// Aggregate the dashboard's three methods across every configured node.
///
/// The aggregator keeps an entry per node; this handler then drops nodes
/// whose `get_info` failed outright, because the dashboard only renders
/// reachable nodes.
async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let methods = vec![
        GET_INFO.to_string(),
        GET_SUPPLY_INFO.to_string(),
        GET_YIELD_INFO.to_string(),
    ];
    let snapshots = state.client.aggregate(&state.endpoints, &methods).await;

    let stats: Vec<NodeStats> = snapshots
        .into_iter()
        .zip(state.nodes.iter())
        .map(|(snapshot, node)| NodeStats {
            node: node.clone(),
            info: snapshot.result(GET_INFO).cloned(),
            supply: snapshot.result(GET_SUPPLY_INFO).cloned(),
            yield_info: snapshot.result(GET_YIELD_INFO).cloned(),
        })
        .filter(|stats| stats.info.is_some())
        .collect();

    debug!(reachable = stats.len(), total = state.nodes.len(), "serving aggregated stats");
    HttpResponse::Ok().json(stats)
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "healthy" })
}
