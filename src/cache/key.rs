//! Cache Key Derivation
//!
//! Deterministic string keys for the three stores. Coordinate-keyed caches
//! round latitude/longitude to 2 decimal places before key construction.
//! The rounding is a required invariant, not an optimization: requests whose
//! coordinates differ by less than ~1 km intentionally share a cache slot,
//! trading a little locational precision for hit rate.

use crate::validation::Units;

// == Rounding ==
/// Rounds a coordinate to 2 decimal places, normalizing negative zero.
fn round_coordinate(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.001 rounds to -0.0; fold it into 0.0 so the key is stable
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// == Key Builders ==
/// Cache key for current weather lookups.
pub fn weather_key(lat: f64, lon: f64, units: Units) -> String {
    format!(
        "weather:{:.2},{:.2}:{}",
        round_coordinate(lat),
        round_coordinate(lon),
        units.api_value()
    )
}

/// Cache key for forecast lookups.
pub fn forecast_key(lat: f64, lon: f64, units: Units) -> String {
    format!(
        "forecast:{:.2},{:.2}:{}",
        round_coordinate(lat),
        round_coordinate(lon),
        units.api_value()
    )
}

/// Cache key for geocoding lookups: lower-cased, trimmed city name
/// (case- and whitespace-insensitive identity).
pub fn geocode_key(city: &str) -> String {
    format!("geocode:{}", city.trim().to_lowercase())
}
