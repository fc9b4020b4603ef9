//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, stale refreshes and
//! upstream failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Recorder ==
/// Lock-free counters updated on the lookup path.
///
/// Atomics keep the hit path free of the entry map's write lock.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    stale_refreshes: AtomicU64,
    upstream_failures: AtomicU64,
}

impl StatsRecorder {
    /// Records a lookup served from the cache.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that had to call the upstream service.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a miss caused by an existing but stale entry.
    pub fn record_stale_refresh(&self) {
        self.stale_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an upstream lookup failure.
    pub fn record_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    pub fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_refreshes: self.stale_refreshes.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            total_entries,
        }
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups served from a fresh entry
    pub hits: u64,
    /// Lookups that called the upstream service (missing or stale entry)
    pub misses: u64,
    /// Misses where a stale entry existed
    pub stale_refreshes: u64,
    /// Upstream calls that failed
    pub upstream_failures: u64,
    /// Current number of entries in the cache, fresh or stale
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
