//! Lazada venture (country) configuration.
//!
//! Each venture has its own REST host; authorization is shared.

use std::fmt;
use std::str::FromStr;

/// REST host for token creation and refresh.
pub const AUTH_BASE_URL: &str = "https://auth.lazada.com/rest";

/// OAuth authorization page sellers are redirected to.
pub const AUTHORIZE_URL: &str = "https://auth.lazada.com/oauth/authorize";

/// Redirect URL registered for the app.
pub const DEFAULT_CALLBACK_URL: &str = "https://4vn.app/lazada/authorized";

/// Lazada venture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Vietnam,
    Singapore,
    Malaysia,
    Thailand,
    Philippines,
    Indonesia,
}

impl Region {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Vietnam => "https://api.lazada.vn/rest",
            Self::Singapore => "https://api.lazada.sg/rest",
            Self::Malaysia => "https://api.lazada.com.my/rest",
            Self::Thailand => "https://api.lazada.co.th/rest",
            Self::Philippines => "https://api.lazada.com.ph/rest",
            Self::Indonesia => "https://api.lazada.co.id/rest",
        }
    }

    /// Lowercase country code used by the authorization page.
    pub fn country_code(&self) -> &'static str {
        match self {
            Self::Vietnam => "vn",
            Self::Singapore => "sg",
            Self::Malaysia => "my",
            Self::Thailand => "th",
            Self::Philippines => "ph",
            Self::Indonesia => "id",
        }
    }

    /// Load region from `LAZADA_REGION` env var.
    ///
    /// Returns `Vietnam` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("LAZADA_REGION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.country_code())
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vn" | "vietnam" => Ok(Self::Vietnam),
            "sg" | "singapore" => Ok(Self::Singapore),
            "my" | "malaysia" => Ok(Self::Malaysia),
            "th" | "thailand" => Ok(Self::Thailand),
            "ph" | "philippines" => Ok(Self::Philippines),
            "id" | "indonesia" => Ok(Self::Indonesia),
            _ => Err(ParseRegionError(s.to_string())),
        }
    }
}

/// Error parsing region string.
#[derive(Debug, Clone)]
pub struct ParseRegionError(String);

impl fmt::Display for ParseRegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid region '{}', expected one of vn, sg, my, th, ph, id",
            self.0
        )
    }
}

impl std::error::Error for ParseRegionError {}
