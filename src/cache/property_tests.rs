//! Property-Based Tests for the cache and validation gate.

use proptest::prelude::*;

use crate::cache::key::{forecast_key, geocode_key, weather_key};
use crate::cache::TtlCache;
use crate::validation::{
    sanitize_city_name, validate_city_name, validate_coordinates, Units,
};

// == Strategies ==
/// Generates coordinates inside the valid ranges.
fn valid_coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0)
}

/// Generates city names made only of permitted characters.
fn valid_city_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z '.-]{1,60}[a-zA-Z]".prop_map(|s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Coordinate validation accepts exactly the finite in-range pairs.
    #[test]
    fn prop_valid_coordinates_accepted((lat, lon) in valid_coordinate_strategy()) {
        prop_assert!(validate_coordinates(lat, lon));
    }

    #[test]
    fn prop_out_of_range_latitude_rejected(lat in 90.0001_f64..1e6, lon in -180.0_f64..=180.0) {
        prop_assert!(!validate_coordinates(lat, lon));
        prop_assert!(!validate_coordinates(-lat, lon));
    }

    #[test]
    fn prop_out_of_range_longitude_rejected(lat in -90.0_f64..=90.0, lon in 180.0001_f64..1e6) {
        prop_assert!(!validate_coordinates(lat, lon));
        prop_assert!(!validate_coordinates(lat, -lon));
    }

    // Sanitization is idempotent and its output always passes validation
    // when the input did.
    #[test]
    fn prop_sanitize_idempotent(city in valid_city_strategy()) {
        let once = sanitize_city_name(&city);
        prop_assert_eq!(sanitize_city_name(&once), once.clone());

        if validate_city_name(&city) {
            prop_assert!(validate_city_name(&once));
        }
    }

    #[test]
    fn prop_sanitized_has_no_double_spaces(city in "[a-zA-Z ]{2,80}") {
        let sanitized = sanitize_city_name(&city);
        prop_assert!(!sanitized.contains("  "));
        prop_assert_eq!(sanitized.trim(), sanitized.as_str());
    }

    // City names containing characters outside the permitted class are
    // always rejected.
    #[test]
    fn prop_invalid_characters_rejected(city in "[a-zA-Z]{2,20}[0-9!@#$%&*]{1,5}") {
        prop_assert!(!validate_city_name(&city));
    }

    // Key derivation is deterministic and stable under rounding: a key
    // derived from already-rounded coordinates equals the original key.
    #[test]
    fn prop_key_stable_under_rounding((lat, lon) in valid_coordinate_strategy()) {
        let key = weather_key(lat, lon, Units::Metric);
        let rounded_lat = (lat * 100.0).round() / 100.0;
        let rounded_lon = (lon * 100.0).round() / 100.0;
        prop_assert_eq!(key, weather_key(rounded_lat, rounded_lon, Units::Metric));
    }

    // Weather and forecast stores never collide on the same coordinates.
    #[test]
    fn prop_weather_and_forecast_keys_disjoint((lat, lon) in valid_coordinate_strategy()) {
        prop_assert_ne!(
            weather_key(lat, lon, Units::Metric),
            forecast_key(lat, lon, Units::Metric)
        );
    }

    // Geocode keys are case- and edge-whitespace-insensitive.
    #[test]
    fn prop_geocode_key_case_insensitive(city in valid_city_strategy()) {
        let padded = format!("  {}  ", city.to_uppercase());
        prop_assert_eq!(geocode_key(&city), geocode_key(&padded));
    }

    // Round-trip: a set followed by a get returns the stored value.
    #[test]
    fn prop_cache_round_trip(key in "[a-z:,.0-9]{1,40}", value in "[a-zA-Z0-9 ]{0,64}") {
        let mut store = TtlCache::new("prop", 300);
        store.set(key.clone(), value.clone());
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Overwrite semantics: the last write wins.
    #[test]
    fn prop_cache_last_write_wins(key in "[a-z]{1,20}", v1 in "[a-z]{1,20}", v2 in "[a-z]{1,20}") {
        let mut store = TtlCache::new("prop", 300);
        store.set(key.clone(), v1);
        store.set(key.clone(), v2.clone());
        prop_assert_eq!(store.get(&key), Some(v2));
        prop_assert_eq!(store.len(), 1);
    }
}
