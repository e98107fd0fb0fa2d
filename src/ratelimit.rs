//! Rate Limiter
//!
//! Fixed-window request counter keyed by client identity, one limiter per
//! policy group (weather lookups vs. geocoding lookups). The limiter is the
//! outermost guard: services consult it before any validation, cache or
//! upstream work.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

// == Policy Constants ==
/// Length of the fixed window.
pub const WINDOW_SECS: u64 = 900;

/// Maximum requests per window for current-weather and forecast lookups.
pub const WEATHER_MAX_REQUESTS: u32 = 100;

/// Maximum requests per window for geocoding lookups.
pub const GEOCODE_MAX_REQUESTS: u32 = 50;

// == Decision ==
/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied {
        /// Seconds the caller should wait before retrying. Always the full
        /// window length, never the remaining time; retrying earlier may
        /// still be denied. Documented simplification.
        retry_after_secs: u64,
    },
}

// == Window Counter ==
#[derive(Debug)]
struct WindowCounter {
    window_start: Instant,
    count: u32,
}

// == Fixed Window Limiter ==
/// Per-client fixed-window counter.
///
/// Requests within the same window accumulate monotonically; the count
/// resets only at window rollover, never by request content. Callers hold
/// the surrounding lock, so check-and-increment is atomic with respect to
/// concurrent requests.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    counters: HashMap<String, WindowCounter>,
}

impl FixedWindowLimiter {
    // == Constructor ==
    /// Creates a limiter allowing `max_requests` per `window` per client.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            counters: HashMap::new(),
        }
    }

    /// Limiter for the weather policy group (current + forecast).
    pub fn weather() -> Self {
        Self::new(Duration::from_secs(WINDOW_SECS), WEATHER_MAX_REQUESTS)
    }

    /// Limiter for the geocoding policy group.
    pub fn geocode() -> Self {
        Self::new(Duration::from_secs(WINDOW_SECS), GEOCODE_MAX_REQUESTS)
    }

    // == Allow ==
    /// Records one request from `client_id` and decides whether it may
    /// proceed.
    ///
    /// The Nth request of a window is allowed iff N <= max; the count rolls
    /// over to a fresh window once the window length has elapsed since the
    /// window opened.
    pub fn allow(&mut self, client_id: &str) -> Decision {
        let now = Instant::now();

        let counter = self
            .counters
            .entry(client_id.to_string())
            .or_insert(WindowCounter {
                window_start: now,
                count: 0,
            });

        // Window rollover resets the count
        if now.duration_since(counter.window_start) >= self.window {
            counter.window_start = now;
            counter.count = 0;
        }

        if counter.count >= self.max_requests {
            debug!(client_id, count = counter.count, "rate limit exceeded");
            return Decision::Denied {
                retry_after_secs: self.window.as_secs(),
            };
        }

        counter.count += 1;
        Decision::Allowed
    }

    // == Prune Stale ==
    /// Drops counters whose window has fully elapsed, returning how many
    /// were removed. Memory reclamation only; `allow` handles rollover on
    /// its own.
    pub fn prune_stale(&mut self) -> usize {
        let now = Instant::now();
        let window = self.window;
        let before = self.counters.len();
        self.counters
            .retain(|_, counter| now.duration_since(counter.window_start) < window);
        before - self.counters.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.counters.len()
    }
}
