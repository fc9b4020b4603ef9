//! Simulated Upstream
//!
//! An in-process stand-in for the remote price service, with fixed latency
//! and configurable failures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::PriceService;
use crate::config::Config;

// == Simulated Price Service ==
/// Returns `base_price` for every item after sleeping for `latency`.
///
/// Failures are reported immediately, without the latency. Every call,
/// successful or not, is counted.
#[derive(Debug)]
pub struct SimulatedPriceService {
    base_price: f64,
    latency: Duration,
    failing_items: HashSet<String>,
    fail_all: AtomicBool,
    calls: AtomicU64,
}

impl SimulatedPriceService {
    // == Constructor ==
    /// Creates a service that always succeeds.
    pub fn new(base_price: f64, latency: Duration) -> Self {
        Self {
            base_price,
            latency,
            failing_items: HashSet::new(),
            fail_all: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    /// Creates the service described by the `UPSTREAM_*` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upstream_base_price, config.upstream_latency())
            .with_failing_items(config.upstream_failing_items.iter().cloned())
    }

    /// Makes lookups for the given item codes fail.
    pub fn with_failing_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing_items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Switches every lookup to failing (or back).
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of lookups received so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceService for SimulatedPriceService {
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) || self.failing_items.contains(item_code) {
            anyhow::bail!("price service refused item {item_code:?}");
        }

        tokio::time::sleep(self.latency).await;
        debug!(item_code, price = self.base_price, "simulated upstream answered");
        Ok(self.base_price)
    }
}
