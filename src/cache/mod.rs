//! Cache Module
//!
//! In-memory TTL caching for the three lookup kinds: current weather,
//! forecast, and geocoding. Each store has its own TTL and a deterministic
//! key-derivation function.

mod entry;
pub mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == TTL Constants ==
/// Current-weather entries live 10 minutes.
pub const WEATHER_TTL_SECS: u64 = 600;

/// Forecast entries live 15 minutes.
pub const FORECAST_TTL_SECS: u64 = 900;

/// Geocoding entries live 24 hours; city-to-coordinate mappings are
/// effectively static.
pub const GEOCODE_TTL_SECS: u64 = 86_400;
