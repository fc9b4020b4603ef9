//! API Module
//!
//! HTTP handlers and routing for the price cache REST API.
//!
//! # Endpoints
//! - `GET /price/:item_code` - Price for one item
//! - `POST /prices` - Prices for many items, resolved concurrently
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
