use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A call parameter uses a name the signer reserves for itself.
    #[error("Parameter '{0}' is reserved for request signing")]
    ReservedParameter(String),
}
