//! Upstream HTTP client
//!
//! Thin wrapper around one `reqwest::Client` with a fixed timeout. Every
//! call goes through `get_json`, which composes an explicit pipeline around
//! the single send: a pre-request step injecting the provider's `appid`
//! credential, and a post-response step logging method, path and
//! status/error. The credential itself is never logged and never appears in
//! gateway responses.
//!
//! No retries and no speculative fan-out: one upstream call per inbound
//! request, and a failure is surfaced immediately for normalization.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::models::provider::{CurrentConditions, ForecastPayload, GeocodeHit};
use crate::upstream::UpstreamError;
use crate::validation::Units;

/// Number of 3-hourly forecast samples to request (3 days x 8 per day).
const FORECAST_SAMPLE_COUNT: u32 = 24;

// == Upstream Client ==
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    // == Constructor ==
    /// Builds the client with the provider base URL, credential and
    /// per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    // == Operations ==
    /// Fetches current conditions for the given coordinates.
    pub async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentConditions, UpstreamError> {
        self.get_json(
            "/data/2.5/weather",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.api_value().to_string()),
            ],
        )
        .await
    }

    /// Fetches the 3-hourly forecast list for the given coordinates.
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<ForecastPayload, UpstreamError> {
        self.get_json(
            "/data/2.5/forecast",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.api_value().to_string()),
                ("cnt", FORECAST_SAMPLE_COUNT.to_string()),
            ],
        )
        .await
    }

    /// Resolves a city name to candidate locations (at most one).
    pub async fn geocode(&self, city: &str) -> Result<Vec<GeocodeHit>, UpstreamError> {
        self.get_json(
            "/geo/1.0/direct",
            &[("q", city.to_string()), ("limit", "1".to_string())],
        )
        .await
    }

    // == Call Pipeline ==
    /// Performs one GET against the provider and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        // Pre-request: every outbound call carries the provider credential
        let request = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())]);

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    info!(method = "GET", path, status = status.as_u16(), "upstream ok");
                    Ok(response.json::<T>().await?)
                } else {
                    warn!(
                        method = "GET",
                        path,
                        status = status.as_u16(),
                        "upstream error status"
                    );
                    Err(UpstreamError::Http {
                        status: status.as_u16(),
                        path: path.to_string(),
                    })
                }
            }
            Err(e) => {
                warn!(method = "GET", path, error = %e, "upstream transport failure");
                Err(UpstreamError::Transport(e))
            }
        }
    }
}
