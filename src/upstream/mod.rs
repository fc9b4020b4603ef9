//! Upstream Service Module
//!
//! The port the cache sits in front of, plus the adapters and the simulated
//! service used by the server binary and the tests.

mod blocking;
mod simulated;

pub use blocking::BlockingPriceService;
pub use simulated::SimulatedPriceService;

use async_trait::async_trait;

// == Price Service Port ==
/// A slow, fallible source of item prices.
///
/// The cache issues one call per missing or stale key, possibly many at once,
/// without additional synchronization. Implementations must be safe to call
/// concurrently. Latency and failure rate are unconstrained.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Looks up the current price for `item_code`.
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64>;
}
