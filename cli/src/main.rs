// Salvium network stats CLI
// Terminal counterpart of the web dashboard: fetches get_info through the
// failover client and renders the headline network numbers.

mod format;

use anyhow::Result;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use prettytable::{Cell, Row, Table};
use serde_json::{json, Value};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use salvium_rpc::types::{NetworkInfo, GET_INFO};
use salvium_rpc::{RetryConfig, RpcClient};

const DEFAULT_NODES: [&str; 3] = [
    "https://seed01.salvium.io",
    "https://seed02.salvium.io",
    "https://seed03.salvium.io",
];

#[derive(Parser)]
#[command(name = "salvium-stats")]
#[command(about = "Salvium network statistics from the public seed nodes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon base URL; repeat to set the failover order
    #[arg(short, long = "node")]
    nodes: Vec<String>,

    /// Attempts per node before failing over to the next one
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the current network stats once
    Stats {
        /// Emit the raw get_info result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Refresh the stats on a fixed interval
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 30)]
        interval: u64,
    },
}

/// Expand node base URLs into JSON-RPC endpoints, in priority order.
fn endpoints(nodes: &[String]) -> Vec<String> {
    let nodes: Vec<String> = if nodes.is_empty() {
        DEFAULT_NODES.iter().map(|n| n.to_string()).collect()
    } else {
        nodes.to_vec()
    };
    nodes
        .iter()
        .map(|node| format!("{}/json_rpc", node.trim_end_matches('/')))
        .collect()
}

async fn fetch_info(client: &RpcClient, endpoints: &[String]) -> Result<Value> {
    Ok(client
        .call_with_failover(endpoints, GET_INFO, json!({}))
        .await?)
}

fn print_stats(info: &NetworkInfo) {
    let target = if info.target == 0 { 120 } else { info.target };
    let hashrate = info.difficulty as f64 / target as f64;
    let network = if info.mainnet { "mainnet" } else { "testnet" };
    let last_block = DateTime::from_timestamp(info.timestamp as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("\n{}", "Salvium Network Stats".bold().green());
    println!("{}", "=".repeat(50));

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Block Height").style_spec("bFg"),
        Cell::new(&format::format_number(info.height)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Difficulty").style_spec("bFg"),
        Cell::new(&format::format_number(info.difficulty)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Network Hashrate").style_spec("bFg"),
        Cell::new(&format::format_hashrate(hashrate)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Circulating Supply").style_spec("bFg"),
        Cell::new(&format::format_sal(info.already_generated_coins)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Base Reward").style_spec("bFg"),
        Cell::new(&format::format_sal(info.base_reward)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Last Block").style_spec("bFg"),
        Cell::new(&last_block),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Network").style_spec("bFg"),
        Cell::new(network),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Daemon Version").style_spec("bFg"),
        Cell::new(&info.version),
    ]));
    table.printstd();
}

fn render(value: Value) -> Result<()> {
    let info: NetworkInfo = serde_json::from_value(value)?;
    print_stats(&info);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let retry = RetryConfig {
        max_attempts: cli.retries.max(1),
        ..RetryConfig::default()
    };
    let client = RpcClient::with_retry(retry)?;
    let endpoints = endpoints(&cli.nodes);

    match cli.command {
        Commands::Stats { json } => {
            let value = fetch_info(&client, &endpoints).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                render(value)?;
            }
        }
        Commands::Watch { interval } => {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
            loop {
                ticker.tick().await;
                // A failed refresh degrades to an error line; the loop
                // keeps running so the next tick can recover.
                match fetch_info(&client, &endpoints).await {
                    Ok(value) => {
                        if let Err(e) = render(value) {
                            eprintln!("{} {}", "Malformed response:".red().bold(), e);
                        }
                    }
                    Err(e) => eprintln!("{} {}", "Connection error:".red().bold(), e),
                }
            }
        }
    }

    Ok(())
}
