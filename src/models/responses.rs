//! Response DTOs for the price cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for a single lookup (GET /price/:item_code)
#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    /// The requested item code
    pub item_code: String,
    /// Its price
    pub price: f64,
}

impl PriceResponse {
    /// Creates a new PriceResponse
    pub fn new(item_code: impl Into<String>, price: f64) -> Self {
        Self {
            item_code: item_code.into(),
            price,
        }
    }
}

/// Response body for a batch lookup (POST /prices)
///
/// `prices` is in arrival order, not request order.
#[derive(Debug, Clone, Serialize)]
pub struct PricesResponse {
    /// Number of prices returned
    pub count: usize,
    /// Prices in arrival order
    pub prices: Vec<f64>,
}

impl PricesResponse {
    /// Creates a new PricesResponse
    pub fn new(prices: Vec<f64>) -> Self {
        Self {
            count: prices.len(),
            prices,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that called the upstream service
    pub misses: u64,
    /// Misses caused by a stale entry
    pub stale_refreshes: u64,
    /// Failed upstream calls
    pub upstream_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Staleness threshold in milliseconds
    pub max_age_ms: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, max_age_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            stale_refreshes: stats.stale_refreshes,
            upstream_failures: stats.upstream_failures,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            max_age_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
