//! Validation Gate
//!
//! Pure input validation for city names, coordinates and unit selectors.
//! Nothing here touches the network or the caches; validation failures are
//! reported as plain `false`/empty values and turned into errors by callers.

use serde::Serialize;

// == City Names ==
/// Validates a city name.
///
/// A name is valid iff, after trimming, its length is between 2 and 100
/// characters and every character is a letter, whitespace, hyphen,
/// apostrophe, or period.
///
/// # Arguments
/// * `name` - Raw city name as received from the caller
pub fn validate_city_name(name: &str) -> bool {
    let trimmed = name.trim();

    // Length check (in characters, after trimming)
    let len = trimmed.chars().count();
    if !(2..=100).contains(&len) {
        return false;
    }

    // Character check: letters, whitespace, hyphens, apostrophes, periods
    trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'))
}

/// Sanitizes a city name by trimming and collapsing internal whitespace
/// runs to single spaces.
///
/// Idempotent: sanitizing an already-sanitized name is a no-op. Called only
/// after `validate_city_name` succeeds, before key derivation and upstream
/// dispatch.
pub fn sanitize_city_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

// == Coordinates ==
/// Validates geographic coordinates.
///
/// Both values must be finite, with latitude in [-90, 90] and longitude in
/// [-180, 180]. NaN and infinities fail.
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

// == Units ==
/// Measurement system passed through to the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Maps a user preference to a provider unit system.
    ///
    /// Total function with a safe default: `"fahrenheit"` maps to imperial,
    /// every other value maps to metric. Callers must independently reject
    /// preferences outside `{celsius, fahrenheit}` before calling this.
    pub fn from_preference(unit: &str) -> Self {
        if unit == "fahrenheit" {
            Units::Imperial
        } else {
            Units::Metric
        }
    }

    /// Value of the provider's `units` query parameter.
    pub fn api_value(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature unit label for responses.
    pub fn temperature_unit(self) -> &'static str {
        match self {
            Units::Metric => "celsius",
            Units::Imperial => "fahrenheit",
        }
    }

    /// Wind speed unit label for responses.
    pub fn wind_speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}
