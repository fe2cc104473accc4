//! Lazada REST API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when interacting with the Lazada REST API.
#[derive(Debug, Error)]
pub enum LazadaError {
    /// REST client error (network, timeout, rate limit).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Signing or credential error.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Error envelope returned by the platform.
    #[error("Lazada API error {code}: {message} (request {request_id})")]
    Api {
        /// Platform error code, e.g. `IllegalAccessToken`.
        code: String,
        /// Error message.
        message: String,
        /// Request ID for support tickets.
        request_id: String,
    },

    /// Request rejected before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to build an XML payload.
    #[error("Payload error: {0}")]
    Payload(String),
}

impl LazadaError {
    /// Check if this error indicates the operation could be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_retryable(),
            Self::Api { code, .. } => {
                matches!(code.as_str(), "ServiceTimeout" | "ServiceUnavailable" | "ApiCallLimit")
            }
            _ => false,
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Rest(rest_err) if rest_err.is_rate_limited())
    }
}
