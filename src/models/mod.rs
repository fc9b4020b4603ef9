//! Request and Response models for the price cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PricesRequest, MAX_BATCH_ITEMS};
pub use responses::{HealthResponse, PriceResponse, PricesResponse, StatsResponse};
