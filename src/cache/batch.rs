//! Batch Lookups
//!
//! Fan-out/fan-in over the single-key path: one task per item code, one
//! outcome channel, one aggregator.

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cache::TransparentCache;
use crate::error::{BatchError, CacheError, Result};

// == Price Outcome ==
/// What one lookup task reports: the item code and its price or failure.
#[derive(Debug)]
pub struct PriceOutcome {
    /// The item code that was looked up
    pub item_code: String,
    /// The price, or why it could not be obtained
    pub result: Result<f64>,
}

impl TransparentCache {
    // == Spawn Lookups ==
    /// Starts one lookup task per item code and returns the outcome stream.
    ///
    /// Outcomes arrive in completion order. The channel has room for every
    /// outcome, so tasks never wait on a slow reader, and it closes once the
    /// last task has reported. Dropping the receiver early does not cancel
    /// the tasks: they finish their lookups and still update the cache.
    pub fn spawn_lookups<I, S>(&self, item_codes: I) -> mpsc::Receiver<PriceOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item_codes: Vec<String> = item_codes.into_iter().map(Into::into).collect();
        let (tx, rx) = mpsc::channel(item_codes.len().max(1));

        for item_code in item_codes {
            let cache = self.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let result = cache.get_price_for(&item_code).await;
                if tx.send(PriceOutcome { item_code, result }).await.is_err() {
                    debug!("batch aggregator gone, outcome discarded");
                }
            });
        }

        rx
    }

    // == Get Prices ==
    /// Resolves every item code concurrently and collects the prices.
    ///
    /// Prices are returned in arrival order, not request order. The first
    /// failure to arrive stops the wait: the returned [`BatchError`] carries
    /// exactly the prices that arrived before it. Lookups still in flight are
    /// left to finish in the background.
    ///
    /// An empty request returns an empty list without starting any task.
    pub async fn get_prices_for<I, S>(
        &self,
        item_codes: I,
    ) -> std::result::Result<Vec<f64>, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item_codes: Vec<String> = item_codes.into_iter().map(Into::into).collect();
        let requested = item_codes.len();
        if requested == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let mut outcomes = self.spawn_lookups(item_codes);
        let mut prices = Vec::with_capacity(requested);

        while let Some(outcome) = outcomes.recv().await {
            match outcome.result {
                Ok(price) => prices.push(price),
                Err(cause) => {
                    warn!(
                        item_code = %outcome.item_code,
                        resolved = prices.len(),
                        requested,
                        "batch lookup stopped on first failure"
                    );
                    return Err(BatchError::new(prices, requested, cause));
                }
            }
        }

        // A task that panicked drops its sender without reporting.
        if prices.len() < requested {
            let missing = requested - prices.len();
            return Err(BatchError::new(
                prices,
                requested,
                CacheError::Internal(format!("{missing} lookup task(s) exited without reporting")),
            ));
        }

        debug!(
            requested,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch lookup complete"
        );
        Ok(prices)
    }
}
