//! Request DTOs for the price cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Largest batch accepted over HTTP. Each item code becomes one task.
pub const MAX_BATCH_ITEMS: usize = 1000;

/// Request body for a batch lookup (POST /prices)
///
/// # Fields
/// - `item_codes`: Item codes to price, possibly empty
#[derive(Debug, Clone, Deserialize)]
pub struct PricesRequest {
    /// Item codes to look up
    #[serde(default)]
    pub item_codes: Vec<String>,
}

impl PricesRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.item_codes.len() > MAX_BATCH_ITEMS {
            return Some(format!(
                "Batch exceeds maximum of {} item codes",
                MAX_BATCH_ITEMS
            ));
        }
        None
    }
}
