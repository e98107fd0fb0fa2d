//! Configuration Module
//!
//! Handles loading server configuration from environment variables. The
//! provider credential is required; everything else has a sensible default.

use std::env;

use anyhow::Context;

use crate::upstream::DEFAULT_TIMEOUT_SECS;

/// Gateway configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider API key, injected on every outbound call
    pub api_key: String,
    /// Provider base URL
    pub base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Upstream client timeout in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `OPENWEATHER_API_KEY` - Provider credential (required)
    /// - `OPENWEATHER_BASE_URL` - Provider base URL (default: `https://api.openweathermap.org`)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 120)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream timeout in seconds (default: 10)
    ///
    /// # Errors
    /// Fails when `OPENWEATHER_API_KEY` is unset; the gateway cannot reach
    /// the provider without it.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .context("Missing required environment variable: OPENWEATHER_API_KEY")?;

        Ok(Self {
            api_key,
            base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}
