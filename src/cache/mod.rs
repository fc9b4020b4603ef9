//! Cache Module
//!
//! Provides a transparent, time-bounded cache in front of a price service,
//! with concurrent multi-key lookups.

mod batch;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use batch::PriceOutcome;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TransparentCache;
