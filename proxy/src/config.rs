//! Proxy configuration
//!
//! Defaults mirror the reference deployment (port 3000, the three public
//! seed nodes, 100 requests per 15-minute window). A TOML file and
//! `SALVIUM_PROXY_*` environment variables layer on top of the defaults.

use config::{Config, ConfigError, Environment, File};
use salvium_rpc::RetryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ProxyConfigValidationError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Bind address for the HTTP server
    pub bind_address: String,
    /// Listen port
    pub port: u16,
    /// Daemon base URLs in failover/priority order. The `/json_rpc` path
    /// is appended when building endpoint URLs.
    pub nodes: Vec<String>,
    /// CORS allowed origins; a literal `*` allows any origin
    pub cors_allowed_origins: Vec<String>,
    /// Per-IP rate limiting
    pub rate_limit: RateLimitConfig,
    /// Retry schedule for upstream RPC calls
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per client IP per window
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            nodes: vec![
                "https://seed01.salvium.io".to_string(),
                "https://seed02.salvium.io".to_string(),
                "https://seed03.salvium.io".to_string(),
            ],
            cors_allowed_origins: vec![
                "https://siko-ctrl.github.io".to_string(),
                "http://localhost:3000".to_string(),
            ],
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// `SALVIUM_PROXY_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                info!("Loading configuration from: {:?}", path);
                builder = builder.add_source(File::from(path.to_path_buf()));
            }
            None => {
                if Path::new("proxy.toml").exists() {
                    info!("Loading configuration from: proxy.toml");
                    builder = builder.add_source(File::with_name("proxy"));
                } else {
                    warn!("No configuration file found, using defaults");
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SALVIUM_PROXY")
                .separator("__")
                .try_parsing(true),
        );

        let config: ProxyConfig = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(format!("Configuration validation error: {e}")))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProxyConfigValidationError> {
        if self.port == 0 {
            return Err(ProxyConfigValidationError::InvalidPort(
                "port must be non-zero".to_string(),
            ));
        }
        if self.nodes.is_empty() {
            return Err(ProxyConfigValidationError::InvalidValue(
                "at least one daemon node must be configured".to_string(),
            ));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return Err(ProxyConfigValidationError::InvalidValue(
                "rate limit window and request budget must be non-zero".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ProxyConfigValidationError::InvalidValue(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Full JSON-RPC endpoint URLs, aligned index-for-index with `nodes`.
    pub fn rpc_endpoints(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|node| format!("{}/json_rpc", node.trim_end_matches('/')))
            .collect()
    }
}
