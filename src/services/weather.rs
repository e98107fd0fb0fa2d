//! Weather Service
//!
//! Current-weather and forecast lookups. Both follow the same shape:
//! 1. limiter check (denial short-circuits everything else)
//! 2. validate input
//! 3. derive the cache key from rounded coordinates
//! 4. cache hit -> return tagged `cached = true`
//! 5. miss -> upstream fetch, transform to the domain model, cache, return
//!    tagged `cached = false`; failures are normalized and never cached
//!
//! Concurrent misses on the same key are not deduplicated: both may reach
//! the provider and both write the cache, last write wins. The provider is
//! idempotent for read-only queries, so this is an accepted trade.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Timelike};
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::key::{forecast_key, weather_key};
use crate::cache::TtlCache;
use crate::error::{GatewayError, Result};
use crate::models::domain::{Fetched, ForecastDay, Location, WeatherData};
use crate::models::provider::{CurrentConditions, ForecastPayload, ForecastSlot};
use crate::ratelimit::{Decision, FixedWindowLimiter};
use crate::upstream::UpstreamClient;
use crate::validation::{validate_coordinates, Units};

/// Days of forecast returned to clients.
const FORECAST_DAYS: usize = 3;

// == Weather Service ==
pub struct WeatherService {
    weather_cache: Arc<RwLock<TtlCache<WeatherData>>>,
    forecast_cache: Arc<RwLock<TtlCache<Vec<ForecastDay>>>>,
    limiter: Arc<RwLock<FixedWindowLimiter>>,
    upstream: Arc<UpstreamClient>,
}

impl WeatherService {
    // == Constructor ==
    /// Wires the service to its shared stores, the weather-group limiter
    /// and the upstream client.
    pub fn new(
        weather_cache: Arc<RwLock<TtlCache<WeatherData>>>,
        forecast_cache: Arc<RwLock<TtlCache<Vec<ForecastDay>>>>,
        limiter: Arc<RwLock<FixedWindowLimiter>>,
        upstream: Arc<UpstreamClient>,
    ) -> Self {
        Self {
            weather_cache,
            forecast_cache,
            limiter,
            upstream,
        }
    }

    // == Current Weather ==
    /// Current conditions for the given coordinates.
    pub async fn current(
        &self,
        client_id: &str,
        lat: f64,
        lon: f64,
        units_pref: &str,
    ) -> Result<Fetched<WeatherData>> {
        // Rate limiting is the outermost guard
        self.check_limiter(client_id).await?;
        let units = validate_weather_input(lat, lon, units_pref)?;

        let key = weather_key(lat, lon, units);
        if let Some(data) = self.weather_cache.write().await.get(&key) {
            return Ok(Fetched::from_cache(data));
        }

        info!(lat, lon, units = units.api_value(), "fetching current weather");
        let payload = self.upstream.current_weather(lat, lon, units).await?;
        let data = to_weather_data(payload, units)?;

        self.weather_cache.write().await.set(key, data.clone());
        Ok(Fetched::from_upstream(data))
    }

    // == Forecast ==
    /// Three-day forecast for the given coordinates.
    pub async fn forecast(
        &self,
        client_id: &str,
        lat: f64,
        lon: f64,
        units_pref: &str,
    ) -> Result<Fetched<Vec<ForecastDay>>> {
        self.check_limiter(client_id).await?;
        let units = validate_weather_input(lat, lon, units_pref)?;

        let key = forecast_key(lat, lon, units);
        if let Some(days) = self.forecast_cache.write().await.get(&key) {
            return Ok(Fetched::from_cache(days));
        }

        info!(lat, lon, units = units.api_value(), "fetching forecast");
        let payload = self.upstream.forecast(lat, lon, units).await?;
        let days = to_forecast_days(payload, units)?;

        self.forecast_cache.write().await.set(key, days.clone());
        Ok(Fetched::from_upstream(days))
    }

    async fn check_limiter(&self, client_id: &str) -> Result<()> {
        match self.limiter.write().await.allow(client_id) {
            Decision::Allowed => Ok(()),
            Decision::Denied { retry_after_secs } => Err(GatewayError::RateLimitExceeded {
                retry_after: retry_after_secs,
            }),
        }
    }
}

// == Validation ==
/// Coordinate and unit validation shared by both weather operations.
fn validate_weather_input(lat: f64, lon: f64, units_pref: &str) -> Result<Units> {
    if !validate_coordinates(lat, lon) {
        return Err(GatewayError::InvalidRequest(
            "Invalid coordinates. Latitude must be -90 to 90, longitude must be -180 to 180"
                .to_string(),
        ));
    }
    if units_pref != "celsius" && units_pref != "fahrenheit" {
        return Err(GatewayError::InvalidRequest(
            "Invalid units. Must be \"celsius\" or \"fahrenheit\"".to_string(),
        ));
    }
    Ok(Units::from_preference(units_pref))
}

// == Transformation ==
/// Maps the provider's current-conditions payload into the domain model.
fn to_weather_data(payload: CurrentConditions, units: Units) -> Result<WeatherData> {
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or(GatewayError::Internal)?;

    Ok(WeatherData {
        location: Location {
            name: payload.name,
            latitude: payload.coord.lat,
            longitude: payload.coord.lon,
            country: payload.sys.and_then(|s| s.country),
        },
        temperature: payload.main.temp.round(),
        temperature_unit: units.temperature_unit(),
        condition: condition.main,
        condition_description: condition.description,
        humidity: payload.main.humidity,
        wind_speed: (payload.wind.speed * 10.0).round() / 10.0,
        wind_speed_unit: units.wind_speed_unit(),
        icon_code: condition.icon,
        timestamp: payload.dt * 1000,
        feels_like: payload.main.feels_like.round(),
    })
}

/// Collapses the provider's 3-hourly samples into per-day forecasts:
/// min/max over the day's samples, condition from the sample closest to
/// noon, first three days only.
fn to_forecast_days(payload: ForecastPayload, units: Units) -> Result<Vec<ForecastDay>> {
    let location = Location {
        name: payload.city.name,
        latitude: payload.city.coord.lat,
        longitude: payload.city.coord.lon,
        country: payload.city.country,
    };

    // BTreeMap keeps the days in chronological order
    let mut by_date: BTreeMap<NaiveDate, Vec<ForecastSlot>> = BTreeMap::new();
    for slot in payload.list {
        let date = DateTime::from_timestamp(slot.dt, 0)
            .ok_or(GatewayError::Internal)?
            .date_naive();
        by_date.entry(date).or_default().push(slot);
    }

    by_date
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, slots)| {
            let min = slots
                .iter()
                .map(|s| s.main.temp)
                .fold(f64::INFINITY, f64::min);
            let max = slots
                .iter()
                .map(|s| s.main.temp)
                .fold(f64::NEG_INFINITY, f64::max);

            let noon = slots
                .iter()
                .min_by_key(|s| {
                    let hour = DateTime::from_timestamp(s.dt, 0)
                        .map(|d| i64::from(d.hour()))
                        .unwrap_or(0);
                    (hour - 12).abs()
                })
                .ok_or(GatewayError::Internal)?;
            let condition = noon.weather.first().cloned().ok_or(GatewayError::Internal)?;

            Ok(ForecastDay {
                location: location.clone(),
                date: date.format("%Y-%m-%d").to_string(),
                day_of_week: date.format("%A").to_string(),
                condition: condition.main,
                condition_description: condition.description,
                icon_code: condition.icon,
                temperature_min: min.round(),
                temperature_max: max.round(),
                temperature_unit: units.temperature_unit(),
                timestamp: noon.dt * 1000,
            })
        })
        .collect()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FORECAST_TTL_SECS, WEATHER_TTL_SECS};
    use crate::models::provider::{City, ConditionSummary, Coord, SlotThermals, Thermals, Wind};
    use std::time::Duration;

    fn service_with_limit(max_requests: u32) -> WeatherService {
        // Upstream points at an unroutable port; tests must never reach it
        let upstream = UpstreamClient::new(
            "http://127.0.0.1:1",
            "test-key",
            Duration::from_secs(1),
        )
        .unwrap();

        WeatherService::new(
            Arc::new(RwLock::new(TtlCache::new("weather", WEATHER_TTL_SECS))),
            Arc::new(RwLock::new(TtlCache::new("forecast", FORECAST_TTL_SECS))),
            Arc::new(RwLock::new(FixedWindowLimiter::new(
                Duration::from_secs(900),
                max_requests,
            ))),
            Arc::new(upstream),
        )
    }

    fn sample_conditions() -> CurrentConditions {
        CurrentConditions {
            coord: Coord {
                lat: 48.86,
                lon: 2.35,
            },
            weather: vec![ConditionSummary {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            main: Thermals {
                temp: 21.6,
                feels_like: 20.4,
                humidity: 40,
            },
            wind: Wind { speed: 3.26 },
            sys: None,
            dt: 1_700_000_000,
            name: "Paris".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_denied_before_validation() {
        let service = service_with_limit(0);

        // Invalid coordinates, but the limiter fires first
        let err = service
            .current("1.2.3.4", 999.0, 999.0, "celsius")
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::RateLimitExceeded { retry_after: 900 });
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected_without_upstream_call() {
        let service = service_with_limit(10);

        let err = service
            .current("1.2.3.4", 91.0, 0.0, "celsius")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_invalid_units_rejected() {
        let service = service_with_limit(10);

        let err = service
            .forecast("1.2.3.4", 48.86, 2.35, "kelvin")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_upstream() {
        let service = service_with_limit(10);
        let data = to_weather_data(sample_conditions(), Units::Metric).unwrap();

        service
            .weather_cache
            .write()
            .await
            .set(weather_key(48.86, 2.35, Units::Metric), data.clone());

        // The upstream client points at a dead port, so success proves the
        // cache served this
        let fetched = service
            .current("1.2.3.4", 48.86, 2.35, "celsius")
            .await
            .unwrap();
        assert!(fetched.cached);
        assert_eq!(fetched.value, data);
    }

    #[test]
    fn test_to_weather_data_rounding() {
        let data = to_weather_data(sample_conditions(), Units::Metric).unwrap();

        assert_eq!(data.temperature, 22.0);
        assert_eq!(data.feels_like, 20.0);
        assert_eq!(data.wind_speed, 3.3);
        assert_eq!(data.temperature_unit, "celsius");
        assert_eq!(data.wind_speed_unit, "m/s");
        assert_eq!(data.timestamp, 1_700_000_000_000);
        assert_eq!(data.location.name, "Paris");
        assert!(data.location.country.is_none());
    }

    #[test]
    fn test_to_weather_data_empty_conditions_is_internal() {
        let mut payload = sample_conditions();
        payload.weather.clear();
        assert_eq!(
            to_weather_data(payload, Units::Metric).unwrap_err(),
            GatewayError::Internal
        );
    }

    fn slot(dt: i64, temp: f64, icon: &str) -> ForecastSlot {
        ForecastSlot {
            dt,
            main: SlotThermals { temp },
            weather: vec![ConditionSummary {
                main: "Clouds".to_string(),
                description: "scattered clouds".to_string(),
                icon: icon.to_string(),
            }],
        }
    }

    #[test]
    fn test_to_forecast_days_aggregation() {
        // 2023-11-15 00:00 UTC
        let midnight = 1_700_006_400;
        let payload = ForecastPayload {
            list: vec![
                slot(midnight, 5.0, "03n"),          // 00:00
                slot(midnight + 12 * 3600, 12.4, "01d"), // 12:00, noon sample
                slot(midnight + 21 * 3600, 8.0, "02n"),  // 21:00
                slot(midnight + 36 * 3600, 14.0, "01d"), // next day 12:00
            ],
            city: City {
                name: "Paris".to_string(),
                coord: Coord {
                    lat: 48.86,
                    lon: 2.35,
                },
                country: Some("FR".to_string()),
            },
        };

        let days = to_forecast_days(payload, Units::Metric).unwrap();
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.date, "2023-11-15");
        assert_eq!(first.day_of_week, "Wednesday");
        assert_eq!(first.temperature_min, 5.0);
        assert_eq!(first.temperature_max, 12.0);
        // Condition comes from the sample closest to noon
        assert_eq!(first.icon_code, "01d");
        assert_eq!(first.timestamp, (midnight + 12 * 3600) * 1000);
        assert_eq!(first.location.country.as_deref(), Some("FR"));
    }

    #[test]
    fn test_to_forecast_days_caps_at_three_days() {
        let midnight = 1_700_006_400;
        let list = (0..5)
            .map(|day| slot(midnight + day * 86_400 + 12 * 3600, 10.0, "01d"))
            .collect();
        let payload = ForecastPayload {
            list,
            city: City {
                name: "Paris".to_string(),
                coord: Coord {
                    lat: 48.86,
                    lon: 2.35,
                },
                country: None,
            },
        };

        let days = to_forecast_days(payload, Units::Metric).unwrap();
        assert_eq!(days.len(), 3);
    }
}
