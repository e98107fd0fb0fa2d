//! Domain model
//!
//! The normalized shapes the gateway returns to its clients, independent of
//! the upstream provider's wire format. All are plain values: caches hand
//! out copies and nothing here is mutated after construction.

use serde::Serialize;

// == Location ==
/// A resolved place. Produced only by a successful geocoding resolution;
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    /// Latitude in [-90, 90]
    pub latitude: f64,
    /// Longitude in [-180, 180]
    pub longitude: f64,
    /// ISO country code, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// == Current Weather ==
/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: Location,
    /// Rounded to the nearest whole degree
    pub temperature: f64,
    /// `"celsius"` or `"fahrenheit"`
    pub temperature_unit: &'static str,
    pub condition: String,
    pub condition_description: String,
    pub humidity: u32,
    /// Rounded to one decimal
    pub wind_speed: f64,
    /// `"m/s"` or `"mph"`
    pub wind_speed_unit: &'static str,
    pub icon_code: String,
    /// Provider observation time, Unix milliseconds
    pub timestamp: i64,
    pub feels_like: f64,
}

// == Forecast ==
/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub location: Location,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    /// English weekday name
    pub day_of_week: String,
    /// Condition of the sample closest to noon
    pub condition: String,
    pub condition_description: String,
    pub icon_code: String,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub temperature_unit: &'static str,
    /// Timestamp of the noon-closest sample, Unix milliseconds
    pub timestamp: i64,
}

// == Fetched ==
/// A service result, tagged with whether it was served from cache.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub value: T,
    pub cached: bool,
}

impl<T> Fetched<T> {
    /// Wraps a value served from cache.
    pub fn from_cache(value: T) -> Self {
        Self {
            value,
            cached: true,
        }
    }

    /// Wraps a value freshly fetched from the upstream provider.
    pub fn from_upstream(value: T) -> Self {
        Self {
            value,
            cached: false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Location {
        Location {
            name: "Paris".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
            country: Some("FR".to_string()),
        }
    }

    #[test]
    fn test_location_serializes_camel_case() {
        let json = serde_json::to_value(paris()).unwrap();
        assert_eq!(json["name"], "Paris");
        assert_eq!(json["latitude"], 48.8566);
        assert_eq!(json["longitude"], 2.3522);
        assert_eq!(json["country"], "FR");
    }

    #[test]
    fn test_location_omits_missing_country() {
        let location = Location {
            country: None,
            ..paris()
        };
        let json = serde_json::to_value(location).unwrap();
        assert!(json.get("country").is_none());
    }

    #[test]
    fn test_weather_data_wire_names() {
        let data = WeatherData {
            location: paris(),
            temperature: 21.0,
            temperature_unit: "celsius",
            condition: "Clear".to_string(),
            condition_description: "clear sky".to_string(),
            humidity: 40,
            wind_speed: 3.2,
            wind_speed_unit: "m/s",
            icon_code: "01d".to_string(),
            timestamp: 1_700_000_000_000,
            feels_like: 20.0,
        };
        let json = serde_json::to_value(data).unwrap();
        assert_eq!(json["temperatureUnit"], "celsius");
        assert_eq!(json["windSpeedUnit"], "m/s");
        assert_eq!(json["iconCode"], "01d");
        assert_eq!(json["feelsLike"], 20.0);
    }

    #[test]
    fn test_fetched_tags() {
        assert!(Fetched::from_cache(1).cached);
        assert!(!Fetched::from_upstream(1).cached);
    }
}
