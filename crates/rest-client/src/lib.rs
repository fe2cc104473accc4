//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - GET with optional bearer token, POST with a form-encoded body
//! - Raw body text returned for the caller to decode
//! - Rate limit detection from the status code or body markers
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//!
//! let client = RestClient::with_default_timeout("https://api.lazada.vn/rest")?;
//! let body = client.get("/seller/get", Some(&signed_query), Some(token)).await?;
//! ```

mod client;
mod error;

pub use client::{classify_body, RestClient, RATE_LIMIT_MARKERS};
pub use error::RestError;
