//! Service Layer
//!
//! Orchestrates each lookup: rate-limit check first, then validation, then
//! cache read, then upstream fetch on miss, then cache write. Services hold
//! injected shared handles to the caches, limiters and upstream client;
//! nothing is ambient.

mod geocoding;
mod weather;

pub use geocoding::GeocodingService;
pub use weather::WeatherService;
