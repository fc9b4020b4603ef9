//! Cache Store Module
//!
//! The transparent cache: serves fresh prices from memory and calls through
//! to the upstream service on a miss or a stale entry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, warn};

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};
use crate::upstream::PriceService;

// == Transparent Cache ==
/// Time-bounded cache wrapping a [`PriceService`].
///
/// Cloning is cheap and yields a handle to the same cache: clones share the
/// entry map, its lock and the statistics. Distinct caches built with
/// [`TransparentCache::new`] never share a lock.
#[derive(Clone)]
pub struct TransparentCache {
    /// Upstream service, shared with whoever built the cache
    service: Arc<dyn PriceService>,
    /// Entries older than this are refetched
    max_age: Duration,
    /// Item code -> cached price
    prices: Arc<RwLock<HashMap<String, CacheEntry>>>,
    /// Performance statistics
    stats: Arc<StatsRecorder>,
    /// Optional bound on simultaneous upstream lookups
    lookup_permits: Option<Arc<Semaphore>>,
}

impl TransparentCache {
    // == Constructor ==
    /// Creates an empty cache in front of `service`.
    ///
    /// A zero `max_age` disables caching: every lookup calls the service.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        Self {
            service,
            max_age,
            prices: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(StatsRecorder::default()),
            lookup_permits: None,
        }
    }

    /// Limits how many upstream lookups may be in flight at once.
    ///
    /// `0` keeps lookups unbounded.
    pub fn with_max_concurrency(mut self, max_concurrent_lookups: usize) -> Self {
        self.lookup_permits = match max_concurrent_lookups {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS)))),
        };
        self
    }

    // == Get Price ==
    /// Returns the price for `item_code`, from the cache if fresh.
    ///
    /// On a miss or a stale entry the upstream service is called exactly
    /// once. A successful answer overwrites the entry; a failure is returned
    /// as [`CacheError::UpstreamLookupFailed`] and leaves the map untouched.
    ///
    /// Concurrent misses on the same key are not deduplicated: each caller
    /// fetches, and the last write wins.
    pub async fn get_price_for(&self, item_code: &str) -> Result<f64> {
        let cached = self.prices.read().await.get(item_code).copied();

        match cached {
            Some(entry) if entry.is_fresh(self.max_age) => {
                self.stats.record_hit();
                debug!(item_code, "price cache hit");
                return Ok(entry.value);
            }
            Some(entry) => {
                self.stats.record_stale_refresh();
                debug!(item_code, age_ms = entry.age().as_millis() as u64, "price is stale");
            }
            None => debug!(item_code, "price cache miss"),
        }
        self.stats.record_miss();

        let value = self.fetch(item_code).await?;

        self.prices
            .write()
            .await
            .insert(item_code.to_string(), CacheEntry::new(value));

        Ok(value)
    }

    // == Fetch ==
    /// Calls the upstream service once, honouring the concurrency bound.
    async fn fetch(&self, item_code: &str) -> Result<f64> {
        let _permit = match &self.lookup_permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|e| CacheError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        self.service
            .get_price_for(item_code)
            .await
            .map_err(|source| {
                self.stats.record_upstream_failure();
                warn!(item_code, error = %source, "upstream price lookup failed");
                CacheError::UpstreamLookupFailed {
                    key: item_code.to_string(),
                    source,
                }
            })
    }

    // == Inspection ==
    /// Returns a copy of the entry for `item_code`, fresh or stale.
    pub async fn entry(&self, item_code: &str) -> Option<CacheEntry> {
        self.prices.read().await.get(item_code).copied()
    }

    /// Staleness threshold fixed at construction.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Returns the number of entries, fresh or stale.
    pub async fn len(&self) -> usize {
        self.prices.read().await.len()
    }

    /// Returns true if nothing has been cached yet.
    pub async fn is_empty(&self) -> bool {
        self.prices.read().await.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.stats.snapshot(total_entries)
    }
}
