//! Response DTOs for the gateway API
//!
//! Every success response shares the same envelope: `success`, `data`,
//! `cached` and an epoch-millisecond `timestamp`. Error envelopes are built
//! by `GatewayError::into_response`.

use serde::Serialize;

use crate::models::domain::Fetched;

// == Success Envelope ==
/// Wire envelope for successful lookups.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    /// True when the value came from the cache rather than the provider
    pub cached: bool,
    /// Response time, Unix milliseconds
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Wraps a service result in the envelope.
    pub fn new(fetched: Fetched<T>) -> Self {
        Self {
            success: true,
            data: fetched.value,
            cached: fetched.cached,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

// == Health Envelope ==
/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub timestamp: i64,
}

impl HealthResponse {
    /// Creates a healthy response with the current timestamp.
    pub fn healthy() -> Self {
        Self {
            success: true,
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
