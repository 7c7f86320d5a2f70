// Salvium stats proxy
// Aggregates get_info/get_supply_info/get_yield_info across the configured
// seed nodes and serves the merged result to the dashboard over HTTP.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use salvium_proxy::config::ProxyConfig;
use salvium_proxy::rate_limiter::RateLimiter;
use salvium_proxy::routes::{self, AppState};
use salvium_rpc::RpcClient;

#[derive(Parser)]
#[command(name = "salvium-proxy")]
#[command(about = "Aggregating stats proxy for Salvium daemon nodes", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port from the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    if allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config =
        ProxyConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let client =
        RpcClient::with_retry(config.retry.clone()).context("Failed to build RPC client")?;
    let state = web::Data::new(AppState {
        client,
        endpoints: config.rpc_endpoints(),
        nodes: config.nodes.clone(),
    });

    info!(nodes = ?config.nodes, "aggregating from configured nodes");
    info!("Proxy server running on {}:{}", config.bind_address, config.port);

    let cors_origins = config.cors_allowed_origins.clone();
    let rate_limit = config.rate_limit.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(build_cors(&cors_origins))
            .wrap(RateLimiter::new(
                rate_limit.max_requests,
                rate_limit.window_secs,
            ))
            .configure(routes::configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
