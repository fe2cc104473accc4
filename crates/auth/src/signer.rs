//! HMAC-SHA256 request signing for the Lazada Open Platform.

use crate::credentials::{AccessToken, AppCredentials};
use crate::error::AuthError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

/// Value of the `sign_method` parameter.
pub const SIGN_METHOD: &str = "sha256";

/// Parameter names owned by the signer. Call parameters may not use them.
pub const RESERVED_PARAMS: [&str; 5] = ["app_key", "timestamp", "sign_method", "access_token", "sign"];

/// HTTP method of the call being signed.
///
/// Decides whether call parameters are emitted in the query string (GET) or
/// left for the form body (POST).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Output of [`RequestSigner::sign_request`].
#[derive(Debug, Clone)]
pub struct SignedQuery {
    method: HttpMethod,
    reserved: BTreeMap<String, String>,
    params: BTreeMap<String, String>,
}

impl SignedQuery {
    /// The uppercase hex signature.
    pub fn sign(&self) -> &str {
        self.reserved.get("sign").map(String::as_str).unwrap_or_default()
    }

    /// Reserved parameters, including `sign`.
    pub fn reserved(&self) -> &BTreeMap<String, String> {
        &self.reserved
    }

    /// Call parameters covered by the signature.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Render the URL-encoded query string (without leading '?').
    ///
    /// GET emits reserved and call parameters; POST emits reserved only.
    pub fn to_query_string(&self) -> String {
        let mut values: BTreeMap<&str, &str> = self
            .reserved
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        if self.method == HttpMethod::Get {
            values.extend(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        serde_urlencoded::to_string(&values).expect("string pairs always encode")
    }
}

/// Request signer for Lazada API calls.
pub struct RequestSigner<'a> {
    credentials: &'a AppCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a AppCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the hex-encoded signature.
    ///
    /// This computes HMAC-SHA256 of the message using the app secret
    /// and returns the result as an uppercase hex string.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        let result = mac.finalize();
        hex::encode_upper(result.into_bytes())
    }

    /// Build the signed parameter set for a call.
    ///
    /// This method:
    /// 1. Builds the reserved parameters (app key, timestamp, sign method, token)
    /// 2. Rejects call parameters that reuse a reserved name
    /// 3. Forms `key + value` for every parameter and sorts those strings
    /// 4. Signs `path` followed by the sorted concatenation
    ///
    /// # Errors
    /// Returns `AuthError::ReservedParameter` on a name collision.
    pub fn sign_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &BTreeMap<String, String>,
        access_token: Option<&AccessToken>,
        timestamp_ms: i64,
    ) -> Result<SignedQuery, AuthError> {
        if let Some(name) = params.keys().find(|k| RESERVED_PARAMS.contains(&k.as_str())) {
            return Err(AuthError::ReservedParameter(name.clone()));
        }

        let mut reserved = BTreeMap::new();
        reserved.insert("app_key".to_string(), self.credentials.app_key().to_string());
        reserved.insert("timestamp".to_string(), timestamp_ms.to_string());
        reserved.insert("sign_method".to_string(), SIGN_METHOD.to_string());

        if let Some(token) = access_token {
            reserved.insert("access_token".to_string(), token.expose_secret().to_string());
        }

        let mut pairs: Vec<String> = reserved
            .iter()
            .chain(params.iter())
            .map(|(k, v)| format!("{}{}", k, v))
            .collect();
        pairs.sort();

        let signature = self.sign(&format!("{}{}", path, pairs.concat()));
        reserved.insert("sign".to_string(), signature);

        Ok(SignedQuery {
            method,
            reserved,
            params: params.clone(),
        })
    }
}
