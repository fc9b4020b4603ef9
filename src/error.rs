//! Error types for the price cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for single-key lookups and the HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream price service failed for this key. Never cached.
    #[error("getting price from service for {key:?}: {source}")]
    UpstreamLookupFailed {
        /// The item code that was looked up
        key: String,
        /// Opaque cause reported by the upstream service
        source: anyhow::Error,
    },

    /// Invalid request data (HTTP layer only, the cache never validates keys)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error, e.g. a lookup worker exited without reporting
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status used when this error reaches a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::UpstreamLookupFailed { .. } => StatusCode::BAD_GATEWAY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Batch Error ==
/// Error returned by a multi-key lookup that stopped on its first failure.
///
/// `resolved` holds the prices that arrived before the failure, in arrival
/// order. It may be shorter than the request, and it may be empty.
#[derive(Error, Debug)]
#[error("batch lookup resolved {} of {requested} prices: {cause}", .resolved.len())]
pub struct BatchError {
    /// Prices received before the failure, in arrival order
    pub resolved: Vec<f64>,
    /// Number of item codes in the request
    pub requested: usize,
    /// The first failure observed
    #[source]
    pub cause: CacheError,
}

impl BatchError {
    /// Creates a new BatchError.
    pub fn new(resolved: Vec<f64>, requested: usize, cause: CacheError) -> Self {
        Self {
            resolved,
            requested,
            cause,
        }
    }

    /// Splits the error into the partial prices and the failure that stopped the batch.
    pub fn into_parts(self) -> (Vec<f64>, CacheError) {
        (self.resolved, self.cause)
    }
}

// == IntoResponse Implementations ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

impl IntoResponse for BatchError {
    fn into_response(self) -> Response {
        let status = self.cause.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "requested": self.requested,
            "resolved": self.resolved,
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the price cache.
pub type Result<T> = std::result::Result<T, CacheError>;
