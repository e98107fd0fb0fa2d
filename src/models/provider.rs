//! Upstream provider wire format
//!
//! Deserialize-only DTOs for the OpenWeather-compatible API. These never
//! leave the gateway; the services transform them into the domain model.

use serde::Deserialize;

// == Shared Fragments ==
#[derive(Debug, Clone, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One element of the provider's `weather` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}

// == Current Weather Payload ==
/// Response body of `/data/2.5/weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub coord: Coord,
    pub weather: Vec<ConditionSummary>,
    pub main: Thermals,
    pub wind: Wind,
    #[serde(default)]
    pub sys: Option<Sys>,
    /// Observation time, Unix seconds
    pub dt: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thermals {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

// == Forecast Payload ==
/// Response body of `/data/2.5/forecast` (3-hourly samples).
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastSlot>,
    pub city: City,
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSlot {
    /// Forecast time, Unix seconds
    pub dt: i64,
    pub main: SlotThermals,
    pub weather: Vec<ConditionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotThermals {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    pub coord: Coord,
    #[serde(default)]
    pub country: Option<String>,
}

// == Geocoding Payload ==
/// One element of the `/geo/1.0/direct` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeHit {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
}
