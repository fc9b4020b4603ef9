//! Blocking Adapter
//!
//! Runs a synchronous lookup function on tokio's blocking pool.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;

use super::PriceService;

/// Adapts a synchronous `Fn(&str) -> anyhow::Result<f64>` into a [`PriceService`].
///
/// Each call occupies one blocking-pool thread for its whole duration, so a
/// batch of slow lookups still proceeds in parallel.
pub struct BlockingPriceService<F> {
    lookup: Arc<F>,
}

impl<F> BlockingPriceService<F>
where
    F: Fn(&str) -> anyhow::Result<f64> + Send + Sync + 'static,
{
    /// Wraps the given lookup function.
    pub fn new(lookup: F) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}

#[async_trait]
impl<F> PriceService for BlockingPriceService<F>
where
    F: Fn(&str) -> anyhow::Result<f64> + Send + Sync + 'static,
{
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64> {
        let lookup = Arc::clone(&self.lookup);
        let item_code = item_code.to_string();

        tokio::task::spawn_blocking(move || lookup(&item_code))
            .await
            .context("blocking price lookup did not complete")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_blocking_lookup_returns_value() {
        let service = BlockingPriceService::new(|code: &str| -> anyhow::Result<f64> {
            Ok(code.len() as f64)
        });

        let price = service.get_price_for("abcd").await.unwrap();
        assert_eq!(price, 4.0);
    }

    #[tokio::test]
    async fn test_blocking_lookup_propagates_error() {
        let service = BlockingPriceService::new(|code: &str| -> anyhow::Result<f64> {
            anyhow::bail!("no price for {code}")
        });

        let err = service.get_price_for("Item1").await.unwrap_err();
        assert_eq!(err.to_string(), "no price for Item1");
    }

    #[tokio::test]
    async fn test_blocking_lookup_panic_becomes_error() {
        let service = BlockingPriceService::new(|_: &str| -> anyhow::Result<f64> {
            panic!("lookup exploded")
        });

        assert!(service.get_price_for("Item1").await.is_err());
    }

    #[tokio::test]
    async fn test_blocking_lookups_run_in_parallel() {
        let service = Arc::new(BlockingPriceService::new(|_: &str| -> anyhow::Result<f64> {
            sleep(Duration::from_millis(300));
            Ok(1.0)
        }));

        let start = Instant::now();
        let handles: Vec<_> = (0..3)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.get_price_for(&format!("Item{i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(start.elapsed() < Duration::from_millis(700));
    }
}
