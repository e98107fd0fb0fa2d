//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::GatewayError;

use super::handlers::{
    current_weather_handler, forecast_handler, geocode_handler, health_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: allows any origin (the gateway fronts a public read-only API)
/// - Tracing: logs all requests
///
/// Unmatched routes produce a 404 `NOT_FOUND` envelope.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/weather/current", get(current_weather_handler))
        .route("/api/weather/forecast", get(forecast_handler))
        .route("/api/weather/geocode", get(geocode_handler))
        .route("/health", get(health_handler))
        .fallback(|| async { GatewayError::NotFound })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
