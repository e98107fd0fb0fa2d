//! Upstream Client Module
//!
//! The sole component permitted to perform outbound calls to the weather
//! provider. Owns the timeout and request-shaping policy; performs no
//! retries.

mod client;
mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;

/// Client-side timeout applied to every outbound call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
