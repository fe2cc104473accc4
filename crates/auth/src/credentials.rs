//! Secure app credential and access token management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the app secret
//! and of bearer tokens, and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Lazada Open Platform app credentials.
///
/// The secret is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct AppCredentials {
    app_key: String,
    app_secret: SecretString,
}

impl AppCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `LAZADA_APP_KEY` - The app key (public)
    /// - `LAZADA_APP_SECRET` - The app secret (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let app_key = std::env::var("LAZADA_APP_KEY")
            .map_err(|_| AuthError::MissingEnvVar("LAZADA_APP_KEY".into()))?;

        let app_secret = std::env::var("LAZADA_APP_SECRET")
            .map_err(|_| AuthError::MissingEnvVar("LAZADA_APP_SECRET".into()))?;

        Ok(Self::new(app_key, app_secret))
    }

    /// Create credentials from explicit values.
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: SecretString::from(app_secret.into()),
        }
    }

    /// Get the app key (public, safe to log).
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Expose the app secret for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.app_secret.expose_secret()
    }
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

/// Seller access token obtained from the OAuth exchange.
///
/// Tokens are immutable values: a refresh produces a new `AccessToken`
/// instead of updating one in place, so each logical session owns its own.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Load a previously issued token from `LAZADA_ACCESS_TOKEN`.
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if the variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        std::env::var("LAZADA_ACCESS_TOKEN")
            .map(Self::new)
            .map_err(|_| AuthError::MissingEnvVar("LAZADA_ACCESS_TOKEN".into()))
    }

    /// Expose the raw token for the signed query or bearer header.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
