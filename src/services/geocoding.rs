//! Geocoding Service
//!
//! City-name to coordinates resolution. Same orchestration shape as the
//! weather service, with one extra domain rule: an empty result array from
//! the provider is a domain-level miss (`LOCATION_NOT_FOUND`), distinct
//! from transport failures, and is never cached.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::key::geocode_key;
use crate::cache::TtlCache;
use crate::error::{GatewayError, Result};
use crate::models::domain::{Fetched, Location};
use crate::ratelimit::{Decision, FixedWindowLimiter};
use crate::upstream::UpstreamClient;
use crate::validation::{sanitize_city_name, validate_city_name};

// == Geocoding Service ==
pub struct GeocodingService {
    cache: Arc<RwLock<TtlCache<Location>>>,
    limiter: Arc<RwLock<FixedWindowLimiter>>,
    upstream: Arc<UpstreamClient>,
}

impl GeocodingService {
    // == Constructor ==
    /// Wires the service to its shared store, the geocoding-group limiter
    /// and the upstream client.
    pub fn new(
        cache: Arc<RwLock<TtlCache<Location>>>,
        limiter: Arc<RwLock<FixedWindowLimiter>>,
        upstream: Arc<UpstreamClient>,
    ) -> Self {
        Self {
            cache,
            limiter,
            upstream,
        }
    }

    // == Resolve ==
    /// Resolves a city name to a `Location`.
    pub async fn resolve(&self, client_id: &str, city: &str) -> Result<Fetched<Location>> {
        // Rate limiting is the outermost guard
        match self.limiter.write().await.allow(client_id) {
            Decision::Allowed => {}
            Decision::Denied { retry_after_secs } => {
                return Err(GatewayError::RateLimitExceeded {
                    retry_after: retry_after_secs,
                })
            }
        }

        if !validate_city_name(city) {
            return Err(GatewayError::InvalidRequest(
                "Invalid city name. Please use 2-100 characters with letters, spaces, and hyphens only"
                    .to_string(),
            ));
        }
        let sanitized = sanitize_city_name(city);

        let key = geocode_key(&sanitized);
        if let Some(location) = self.cache.write().await.get(&key) {
            return Ok(Fetched::from_cache(location));
        }

        info!(city = %sanitized, "resolving city coordinates");
        let hits = self.upstream.geocode(&sanitized).await?;

        // Empty array is a domain miss, not a transport error
        let Some(hit) = hits.into_iter().next() else {
            return Err(GatewayError::LocationNotFound);
        };

        let location = Location {
            name: hit.name,
            latitude: hit.lat,
            longitude: hit.lon,
            country: hit.country,
        };

        self.cache.write().await.set(key, location.clone());
        Ok(Fetched::from_upstream(location))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::GEOCODE_TTL_SECS;
    use std::time::Duration;

    fn service_with_limit(max_requests: u32) -> GeocodingService {
        // Upstream points at an unroutable port; tests must never reach it
        let upstream = UpstreamClient::new(
            "http://127.0.0.1:1",
            "test-key",
            Duration::from_secs(1),
        )
        .unwrap();

        GeocodingService::new(
            Arc::new(RwLock::new(TtlCache::new("geocode", GEOCODE_TTL_SECS))),
            Arc::new(RwLock::new(FixedWindowLimiter::new(
                Duration::from_secs(900),
                max_requests,
            ))),
            Arc::new(upstream),
        )
    }

    #[tokio::test]
    async fn test_rate_limit_denied_before_validation() {
        let service = service_with_limit(0);

        let err = service.resolve("1.2.3.4", "!!!").await.unwrap_err();
        assert_eq!(err, GatewayError::RateLimitExceeded { retry_after: 900 });
    }

    #[tokio::test]
    async fn test_invalid_city_rejected_without_upstream_call() {
        let service = service_with_limit(10);

        for city in ["", "A", "Paris123", "<script>"] {
            let err = service.resolve("1.2.3.4", city).await.unwrap_err();
            assert!(
                matches!(err, GatewayError::InvalidRequest(_)),
                "city {:?} should be invalid",
                city
            );
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_upstream() {
        let service = service_with_limit(10);
        let paris = Location {
            name: "Paris".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
            country: Some("FR".to_string()),
        };

        service
            .cache
            .write()
            .await
            .set(geocode_key("paris"), paris.clone());

        // Case and padding differences still hit the same slot
        let fetched = service.resolve("1.2.3.4", "  PARIS ").await.unwrap();
        assert!(fetched.cached);
        assert_eq!(fetched.value, paris);
    }
}
