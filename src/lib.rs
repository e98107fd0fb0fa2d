//! Weather Gateway - a caching, rate-limited front for the OpenWeather API
//!
//! Fronts a rate-limited, latency-variable upstream weather provider with
//! in-memory TTL caching, per-client request-rate control, input validation
//! and a normalized error taxonomy.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod services;
pub mod tasks;
pub mod upstream;
pub mod validation;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::GatewayError;
pub use tasks::spawn_sweep_task;
