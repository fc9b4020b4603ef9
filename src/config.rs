//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Staleness threshold in milliseconds, 0 disables caching
    pub max_age_ms: u64,
    /// Upper bound on simultaneous upstream lookups, 0 = unbounded
    pub max_concurrent_lookups: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Latency of the simulated upstream service in milliseconds
    pub upstream_latency_ms: u64,
    /// Price returned by the simulated upstream service
    pub upstream_base_price: f64,
    /// Item codes the simulated upstream service refuses to price
    pub upstream_failing_items: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PRICE_MAX_AGE_MS` - Staleness threshold (default: 3000)
    /// - `MAX_CONCURRENT_LOOKUPS` - Fan-out bound (default: 0, unbounded)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_LATENCY_MS` - Simulated upstream latency (default: 200)
    /// - `UPSTREAM_BASE_PRICE` - Simulated upstream price (default: 12.34)
    /// - `UPSTREAM_FAILING_ITEMS` - Comma separated item codes that fail (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_age_ms: parse_var("PRICE_MAX_AGE_MS").unwrap_or(defaults.max_age_ms),
            max_concurrent_lookups: parse_var("MAX_CONCURRENT_LOOKUPS")
                .unwrap_or(defaults.max_concurrent_lookups),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_latency_ms: parse_var("UPSTREAM_LATENCY_MS")
                .unwrap_or(defaults.upstream_latency_ms),
            upstream_base_price: parse_var("UPSTREAM_BASE_PRICE")
                .unwrap_or(defaults.upstream_base_price),
            upstream_failing_items: env::var("UPSTREAM_FAILING_ITEMS")
                .map(|v| parse_item_list(&v))
                .unwrap_or(defaults.upstream_failing_items),
        }
    }

    /// Staleness threshold as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    /// Simulated upstream latency as a Duration.
    pub fn upstream_latency(&self) -> Duration {
        Duration::from_millis(self.upstream_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age_ms: 3000,
            max_concurrent_lookups: 0,
            server_port: 3000,
            upstream_latency_ms: 200,
            upstream_base_price: 12.34,
            upstream_failing_items: Vec::new(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_item_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
