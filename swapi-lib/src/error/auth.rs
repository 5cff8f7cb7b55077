//! Authentication error types

use super::Error;
use super::HttpErrorDetail;

/// Errors that can occur while obtaining or verifying a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login response carried no usable `token`.
    #[error("Login response did not contain a token")]
    MissingToken,

    /// The login endpoint answered with a non-2xx status.
    #[error("Login rejected: {0}")]
    LoginRejected(HttpErrorDetail),

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),

    /// The token was refused by the API.
    #[error("Token verification failed: {0}")]
    VerificationFailed(Box<Error>),
}
