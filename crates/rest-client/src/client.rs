//! Generic REST client wrapper around reqwest.

use crate::error::RestError;
use reqwest::{Client, RequestBuilder};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body substrings that mark a throttled call.
///
/// `AppCallLimit` is the app-level quota marker; `ApiCallLimit` is the
/// per-API code the platform returns in its error envelope.
pub const RATE_LIMIT_MARKERS: [&str; 2] = ["AppCallLimit", "ApiCallLimit"];

/// Generic REST client returning raw response bodies.
///
/// Non-2xx statuses are not errors here: the body is handed back for the
/// caller to decode. Only transport failures and rate limiting fail.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.lazada.vn/rest")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request and return the body text.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/products/get")
    /// * `query` - Optional query string (without leading '?')
    /// * `bearer` - Optional token sent as `Authorization: Bearer <token>`
    pub async fn get(
        &self,
        path: &str,
        query: Option<&str>,
        bearer: Option<&str>,
    ) -> Result<String, RestError> {
        let url = self.build_url(path, query);
        tracing::debug!(path = %path, "GET request");

        let mut request = self.client.get(&url);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        self.execute(path, request).await
    }

    /// Make a POST request with an `application/x-www-form-urlencoded` body.
    ///
    /// # Arguments
    /// * `path` - Request path
    /// * `query` - Optional query string (without leading '?')
    /// * `form` - Fields encoded into the request body
    pub async fn post_form(
        &self,
        path: &str,
        query: Option<&str>,
        form: &BTreeMap<String, String>,
    ) -> Result<String, RestError> {
        let url = self.build_url(path, query);
        tracing::debug!(path = %path, fields = form.len(), "POST request");

        let request = self.client.post(&url).form(form);

        self.execute(path, request).await
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Send the request and read the full body as text.
    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<String, RestError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            tracing::debug!(path = %path, status = status, "Non-success status");
        }
        tracing::trace!(path = %path, status = status, body = %body, "Response body");

        classify_body(status, body)
    }
}

/// Classify a response body, detecting rate limiting.
///
/// A 429 status or any [`RATE_LIMIT_MARKERS`] substring in the body yields
/// `RestError::RateLimited`, whatever else the body contains.
pub fn classify_body(status: u16, body: String) -> Result<String, RestError> {
    if status == 429 || RATE_LIMIT_MARKERS.iter().any(|m| body.contains(m)) {
        tracing::warn!(status = status, "Rate limit exceeded");
        return Err(RestError::RateLimited { status });
    }

    Ok(body)
}
