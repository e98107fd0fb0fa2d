//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint. Handlers only translate
//! between the wire and the services: query parameters are parsed leniently
//! here (unparsable coordinates become NaN) so that the services keep full
//! control of the guard order - rate limit first, then validation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::cache::{TtlCache, FORECAST_TTL_SECS, GEOCODE_TTL_SECS, WEATHER_TTL_SECS};
use crate::config::Config;
use crate::error::Result;
use crate::models::domain::{ForecastDay, Location, WeatherData};
use crate::models::{ApiResponse, HealthResponse};
use crate::ratelimit::FixedWindowLimiter;
use crate::services::{GeocodingService, WeatherService};
use crate::upstream::UpstreamClient;

// == App State ==
/// Application state shared across all handlers.
///
/// Caches, limiters and the upstream client are constructed once at process
/// start and injected into the services; the same handles are exposed here
/// for the sweep task.
#[derive(Clone)]
pub struct AppState {
    pub weather_cache: Arc<RwLock<TtlCache<WeatherData>>>,
    pub forecast_cache: Arc<RwLock<TtlCache<Vec<ForecastDay>>>>,
    pub geocode_cache: Arc<RwLock<TtlCache<Location>>>,
    pub weather_limiter: Arc<RwLock<FixedWindowLimiter>>,
    pub geocode_limiter: Arc<RwLock<FixedWindowLimiter>>,
    pub weather: Arc<WeatherService>,
    pub geocoding: Arc<GeocodingService>,
}

impl AppState {
    /// Creates the full state graph from configuration.
    ///
    /// # Errors
    /// Fails only if the upstream HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        let upstream = Arc::new(UpstreamClient::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.upstream_timeout_secs),
        )?);

        let weather_cache = Arc::new(RwLock::new(TtlCache::new("weather", WEATHER_TTL_SECS)));
        let forecast_cache = Arc::new(RwLock::new(TtlCache::new("forecast", FORECAST_TTL_SECS)));
        let geocode_cache = Arc::new(RwLock::new(TtlCache::new("geocode", GEOCODE_TTL_SECS)));
        let weather_limiter = Arc::new(RwLock::new(FixedWindowLimiter::weather()));
        let geocode_limiter = Arc::new(RwLock::new(FixedWindowLimiter::geocode()));

        let weather = Arc::new(WeatherService::new(
            weather_cache.clone(),
            forecast_cache.clone(),
            weather_limiter.clone(),
            upstream.clone(),
        ));
        let geocoding = Arc::new(GeocodingService::new(
            geocode_cache.clone(),
            geocode_limiter.clone(),
            upstream,
        ));

        Ok(Self {
            weather_cache,
            forecast_cache,
            geocode_cache,
            weather_limiter,
            geocode_limiter,
            weather,
            geocoding,
        })
    }
}

// == Query Parameters ==
/// Query parameters for the two coordinate endpoints. Kept as raw strings;
/// parsing happens after the service's rate-limit check has had its say.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub units: Option<String>,
}

/// Query parameters for the geocode endpoint.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub city: Option<String>,
}

/// Parses a coordinate pair; anything unparsable becomes NaN, which the
/// validation gate rejects.
fn parse_coordinates(query: &WeatherQuery) -> (f64, f64) {
    let parse = |v: &Option<String>| {
        v.as_deref()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    };
    (parse(&query.lat), parse(&query.lon))
}

// == Client Identity ==
/// Identity used for rate limiting: first `X-Forwarded-For` entry when the
/// gateway sits behind a proxy, otherwise the socket peer address.
fn client_id(headers: &HeaderMap, connect: Option<&ConnectInfo<SocketAddr>>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    connect
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// == Handlers ==
/// Handler for GET /api/weather/current
pub async fn current_weather_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
    headers: HeaderMap,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<ApiResponse<WeatherData>>> {
    let client = client_id(&headers, connect.as_ref());
    let (lat, lon) = parse_coordinates(&query);
    let units = query.units.as_deref().unwrap_or("celsius");

    let fetched = state.weather.current(&client, lat, lon, units).await?;
    Ok(Json(ApiResponse::new(fetched)))
}

/// Handler for GET /api/weather/forecast
pub async fn forecast_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
    headers: HeaderMap,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<ApiResponse<Vec<ForecastDay>>>> {
    let client = client_id(&headers, connect.as_ref());
    let (lat, lon) = parse_coordinates(&query);
    let units = query.units.as_deref().unwrap_or("celsius");

    let fetched = state.weather.forecast(&client, lat, lon, units).await?;
    Ok(Json(ApiResponse::new(fetched)))
}

/// Handler for GET /api/weather/geocode
pub async fn geocode_handler(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
    headers: HeaderMap,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<ApiResponse<Location>>> {
    let client = client_id(&headers, connect.as_ref());
    let city = query.city.as_deref().unwrap_or("");

    let fetched = state.geocoding.resolve(&client, city).await?;
    Ok(Json(ApiResponse::new(fetched)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
