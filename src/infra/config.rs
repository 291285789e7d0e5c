//! Centralized configuration (environment variables + defaults).

use crate::storage::FailurePolicy;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PROVERBS_PATH: &str = "proverbs.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PERF_ITEMS: usize = 1_000;

/// Path of the JSON document backing the collection.
pub fn proverbs_path() -> PathBuf {
    PathBuf::from(env_or("PROVERBS_PATH", DEFAULT_PROVERBS_PATH))
}

/// Listen address for the API server.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    parse_bind_addr(&env_or("BIND_ADDR", DEFAULT_BIND_ADDR))
}

/// Storage failure policy (`propagate` or `fail_open`), defaults to `propagate`.
pub fn storage_failure_policy() -> anyhow::Result<FailurePolicy> {
    match std::env::var("STORAGE_FAILURE_POLICY") {
        Ok(v) => v
            .parse::<FailurePolicy>()
            .map_err(|e| anyhow::anyhow!("STORAGE_FAILURE_POLICY: {}", e)),
        Err(_) => Ok(FailurePolicy::default()),
    }
}

/// Number of records the performance probe creates.
pub fn perf_items() -> anyhow::Result<usize> {
    match std::env::var("PERF_ITEMS") {
        Ok(v) => v
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("PERF_ITEMS must be a valid usize, got '{}'", v)),
        Err(_) => Ok(DEFAULT_PERF_ITEMS),
    }
}

/// Everything the API server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub proverbs_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            proverbs_path: proverbs_path(),
            bind_addr: bind_addr()?,
            failure_policy: storage_failure_policy()?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bind_addr(raw: &str) -> anyhow::Result<SocketAddr> {
    raw.trim()
        .parse::<SocketAddr>()
        .map_err(|e| anyhow::anyhow!("BIND_ADDR '{}' is not a socket address: {}", raw, e))
}
