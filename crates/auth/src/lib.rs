//! Authentication and signing for the Lazada Open Platform.
//!
//! This crate provides secure credential management and request signing
//! for calls to the Lazada REST API.
//!
//! # Features
//!
//! - **Secure Credentials**: The app secret and access tokens are wrapped in
//!   `SecretString` to prevent accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA256 Signing**: Implements the `path + sorted(key+value)` scheme,
//!   uppercase hex.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{AppCredentials, HttpMethod, RequestSigner};
//!
//! let credentials = AppCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let signed = signer.sign_request(
//!     HttpMethod::Get,
//!     "/product/item/get",
//!     &params,
//!     Some(&access_token),
//!     auth::timestamp_ms(),
//! )?;
//! let query = signed.to_query_string();
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{AccessToken, AppCredentials};
pub use error::AuthError;
pub use signer::{timestamp_ms, HttpMethod, RequestSigner, SignedQuery, RESERVED_PARAMS, SIGN_METHOD};
