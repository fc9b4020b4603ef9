//! Cache Entry Module
//!
//! Defines a cached price and its freshness rule.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A price obtained from the upstream service, stamped with when it was fetched.
///
/// The key lives in the owning map. Entries are never invalidated explicitly:
/// staleness is purely a function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    /// Price returned by the upstream service
    pub value: f64,
    /// When the price was fetched (monotonic clock)
    pub fetched_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry fetched now.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the price was fetched.
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals `max_age` is stale, so a
    /// zero `max_age` makes every entry stale the moment it is written.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.is_fresh_at(Instant::now(), max_age)
    }

    /// Same as [`is_fresh`](Self::is_fresh) against an explicit `now`.
    pub fn is_fresh_at(&self, now: Instant, max_age: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < max_age
    }
}
