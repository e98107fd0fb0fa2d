//! Error types for the weather gateway
//!
//! A closed taxonomy of domain errors, each carrying a machine-readable
//! code, a default HTTP status and a user-facing message. Upstream failures
//! are normalized into this taxonomy before they leave the service layer;
//! raw provider errors never cross the gateway boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Backoff hint (seconds) attached when the upstream provider itself
/// returns 429.
const UPSTREAM_RETRY_AFTER_SECS: u64 = 600;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Failed validation: bad coordinates, bad units, malformed city name
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream rejected the provider credentials (HTTP 401)
    #[error("Unable to connect to weather service")]
    Unauthorized,

    /// Upstream denied access (HTTP 403)
    #[error("Access denied to weather service")]
    Forbidden,

    /// No location matched the request (upstream 404 or empty geocode result)
    #[error("Location not found. Please check your input and try again")]
    LocationNotFound,

    /// Gateway-side limiter denial or upstream HTTP 429
    #[error("Too many requests. Please wait a moment and try again")]
    RateLimitExceeded {
        /// Seconds the caller should wait before retrying
        retry_after: u64,
    },

    /// Upstream call exceeded the client timeout
    #[error("Request timed out. Please try again")]
    Timeout,

    /// Upstream unreachable at the transport level
    #[error("Network error. Please try again")]
    NetworkError,

    /// Upstream answered with a 5xx status
    #[error("Weather service temporarily unavailable. Please try again in a moment")]
    ServiceUnavailable,

    /// Unmatched route
    #[error("Endpoint not found")]
    NotFound,

    /// Anything unclassified
    #[error("An unexpected error occurred. Please try again")]
    Internal,
}

impl GatewayError {
    // == Code ==
    /// Machine-readable error code; clients branch on this.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "INVALID_REQUEST",
            GatewayError::Unauthorized => "UNAUTHORIZED",
            GatewayError::Forbidden => "FORBIDDEN",
            GatewayError::LocationNotFound => "LOCATION_NOT_FOUND",
            GatewayError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            GatewayError::Timeout => "TIMEOUT",
            GatewayError::NetworkError => "NETWORK_ERROR",
            GatewayError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            GatewayError::NotFound => "NOT_FOUND",
            GatewayError::Internal => "INTERNAL_ERROR",
        }
    }

    // == Status ==
    /// Default HTTP status for this error.
    ///
    /// UNAUTHORIZED and FORBIDDEN surface as 500: a provider credential
    /// problem is the operator's misconfiguration, not the caller's fault.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::LocationNotFound | GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::NetworkError | GatewayError::ServiceUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::Unauthorized | GatewayError::Forbidden | GatewayError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // == Retry After ==
    /// Seconds to wait before retrying, when the error carries one.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            GatewayError::RateLimitExceeded { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

// == Upstream Normalization ==
/// Table-driven mapping from upstream failures into the closed taxonomy.
///
/// Total: every possible upstream failure produces a well-formed
/// `GatewayError`. Unmatched HTTP statuses and unclassified transport
/// failures fall through to `Internal`.
impl From<UpstreamError> for GatewayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Http { status, .. } => match status {
                400 => GatewayError::InvalidRequest(
                    "Invalid request. Please check your input and try again".to_string(),
                ),
                401 => GatewayError::Unauthorized,
                403 => GatewayError::Forbidden,
                404 => GatewayError::LocationNotFound,
                429 => GatewayError::RateLimitExceeded {
                    retry_after: UPSTREAM_RETRY_AFTER_SECS,
                },
                500..=599 => GatewayError::ServiceUnavailable,
                _ => GatewayError::Internal,
            },
            UpstreamError::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            UpstreamError::Transport(e) if e.is_connect() || e.is_request() => {
                GatewayError::NetworkError
            }
            UpstreamError::Transport(_) => GatewayError::Internal,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(false));
        body.insert("error".to_string(), json!(self.to_string()));
        body.insert("code".to_string(), json!(self.code()));
        if let Some(retry_after) = self.retry_after() {
            body.insert("retryAfter".to_string(), json!(retry_after));
        }
        body.insert(
            "timestamp".to_string(),
            json!(chrono::Utc::now().timestamp_millis()),
        );

        (self.status(), Json(Value::Object(body))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
