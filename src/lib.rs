//! Price Cache - A transparent, time-bounded cache for a slow price service
//!
//! Serves fresh prices from memory, calls through to the upstream service on
//! a miss or stale entry, and resolves batches of item codes concurrently.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStats, PriceOutcome, TransparentCache};
pub use config::Config;
pub use error::{BatchError, CacheError};
pub use upstream::{BlockingPriceService, PriceService, SimulatedPriceService};
