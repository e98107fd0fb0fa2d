//! API Module
//!
//! HTTP handlers and routing for the gateway's REST surface.
//!
//! # Endpoints
//! - `GET /api/weather/current` - Current weather for coordinates
//! - `GET /api/weather/forecast` - 3-day forecast for coordinates
//! - `GET /api/weather/geocode` - Coordinates for a city name
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
