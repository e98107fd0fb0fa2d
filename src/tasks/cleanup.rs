//! TTL Sweep Task
//!
//! Background task that periodically reclaims expired cache entries and
//! stale rate-limit windows. Purely a memory bound: reads already apply the
//! expiry check lazily, so the sweep interval never affects correctness.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns the background sweep task.
///
/// Every `interval_secs` seconds the task removes expired entries from all
/// three caches and drops limiter counters whose window has elapsed. The
/// interval must not be so short that sweeping competes with request
/// traffic for the store locks; the default (120 s) is far below any TTL.
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_sweep_task(state: AppState, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let mut removed = 0;
            removed += state.weather_cache.write().await.sweep_expired();
            removed += state.forecast_cache.write().await.sweep_expired();
            removed += state.geocode_cache.write().await.sweep_expired();

            let mut pruned = 0;
            pruned += state.weather_limiter.write().await.prune_stale();
            pruned += state.geocode_limiter.write().await.prune_stale();

            if removed > 0 || pruned > 0 {
                info!(removed, pruned, "sweep reclaimed expired state");
            } else {
                debug!("sweep found nothing to reclaim");
            }

            log_stats(state.weather_cache.read().await.stats(), "weather");
            log_stats(state.forecast_cache.read().await.stats(), "forecast");
            log_stats(state.geocode_cache.read().await.stats(), "geocode");
        }
    })
}

fn log_stats(stats: crate::cache::CacheStats, cache: &str) {
    debug!(
        cache,
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.total_entries,
        hit_rate = format!("{:.2}", stats.hit_rate()),
        "cache stats"
    );
}
