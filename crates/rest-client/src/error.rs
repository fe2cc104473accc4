//! Transport errors.

use thiserror::Error;

/// Failure to get a usable body back from the platform.
///
/// A non-2xx status is not one of these: vendor error envelopes are
/// returned as body text and decoded by the caller.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Request timeout")]
    Timeout,

    /// Network failure, with the underlying cause.
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP 429 or a call-limit marker in the body.
    #[error("Rate limit exceeded (HTTP {status})")]
    RateLimited { status: u16 },

    /// The request could not be built, e.g. a malformed base URL.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        match err {
            e if e.is_timeout() => RestError::Timeout,
            e if e.is_builder() => RestError::RequestBuild(e.to_string()),
            e => RestError::Connection(e.to_string()),
        }
    }
}

impl RestError {
    /// Whether sending the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RestError::Timeout | RestError::Connection(_) | RestError::RateLimited { .. } => true,
            RestError::RequestBuild(_) => false,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RestError::RateLimited { .. })
    }
}
