//! Data models for the weather gateway
//!
//! Split into the domain model returned to clients, the upstream provider's
//! wire format (deserialize only), and the response envelopes.

pub mod domain;
pub mod provider;
pub mod responses;

// Re-export commonly used types
pub use domain::{Fetched, ForecastDay, Location, WeatherData};
pub use responses::{ApiResponse, HealthResponse};
