//! Client configuration.

use common::{Region, AUTHORIZE_URL, AUTH_BASE_URL, DEFAULT_CALLBACK_URL};
use std::time::Duration;

/// Request timeout for Lazada API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoints and transport settings for [`crate::LazadaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub region: Region,
    pub rest_base_url: String,
    pub auth_base_url: String,
    pub authorize_url: String,
    pub callback_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default endpoints for a region.
    pub fn for_region(region: Region) -> Self {
        Self {
            region,
            rest_base_url: region.rest_base_url().to_string(),
            auth_base_url: AUTH_BASE_URL.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `LAZADA_REGION`, `LAZADA_CALLBACK_URL` and `LAZADA_TIMEOUT_SECS`;
    /// anything unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::for_region(Region::from_env());

        if let Ok(url) = std::env::var("LAZADA_CALLBACK_URL") {
            config.callback_url = url;
        }

        if let Some(secs) = std::env::var("LAZADA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_rest_base_url(mut self, url: impl Into<String>) -> Self {
        self.rest_base_url = url.into();
        self
    }

    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_region(Region::default())
    }
}
