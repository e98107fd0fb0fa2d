//! Upstream failure type.
//!
//! Distinguishes HTTP-level failures (the provider answered with a non-2xx
//! status) from transport-level failures (timeout, connection refused, body
//! decode). The error normalizer in `crate::error` maps both into the
//! gateway's closed taxonomy.

use thiserror::Error;

// == Upstream Error ==
/// A failed call to the weather provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The provider responded with a non-success HTTP status.
    #[error("upstream returned HTTP {status} for {path}")]
    Http { status: u16, path: String },

    /// The request never produced a usable response (timeout, connect
    /// failure, malformed body).
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
