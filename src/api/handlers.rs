//! API Handlers
//!
//! HTTP request handlers for each price cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::TransparentCache;
use crate::config::Config;
use crate::error::{BatchError, CacheError, Result};
use crate::models::{HealthResponse, PriceResponse, PricesRequest, PricesResponse, StatsResponse};
use crate::upstream::SimulatedPriceService;

/// Application state shared across all handlers.
///
/// The cache is itself a cheap, shareable handle.
#[derive(Clone)]
pub struct AppState {
    /// Transparent price cache
    pub cache: TransparentCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: TransparentCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fronts a [`SimulatedPriceService`] configured by the `UPSTREAM_*`
    /// settings.
    pub fn from_config(config: &Config) -> Self {
        let service = Arc::new(SimulatedPriceService::from_config(config));
        let cache = TransparentCache::new(service, config.max_age())
            .with_max_concurrency(config.max_concurrent_lookups);
        Self::new(cache)
    }
}

/// Handler for GET /price/:item_code
///
/// Returns the item's price, from the cache when fresh.
pub async fn price_handler(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<Json<PriceResponse>> {
    let price = state.cache.get_price_for(&item_code).await?;

    Ok(Json(PriceResponse::new(item_code, price)))
}

/// Handler for POST /prices
///
/// Resolves all item codes concurrently. Fails with the first upstream
/// error, reporting the prices that were resolved before it.
pub async fn prices_handler(
    State(state): State<AppState>,
    Json(req): Json<PricesRequest>,
) -> std::result::Result<Json<PricesResponse>, BatchError> {
    if let Some(error_msg) = req.validate() {
        return Err(BatchError::new(
            Vec::new(),
            req.item_codes.len(),
            CacheError::InvalidRequest(error_msg),
        ));
    }

    let prices = state.cache.get_prices_for(req.item_codes).await?;

    Ok(Json(PricesResponse::new(prices)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let max_age_ms = state.cache.max_age().as_millis() as u64;

    Json(StatsResponse::new(&stats, max_age_ms))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
