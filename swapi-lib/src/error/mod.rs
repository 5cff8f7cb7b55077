//! Error types

mod api;
mod auth;
mod query;
mod validation;

pub use api::*;
pub use auth::*;
pub use query::*;
pub use validation::*;

/// Crate-level error returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-2xx status, or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Obtaining or verifying a token failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The query description could not be encoded.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A 2xx response body was not valid JSON, or could not be decoded into
    /// the requested type.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The base URL or a request path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client or a request part could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),
}

impl Error {
    /// Creates a new decode error with the raw response body.
    pub fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status_code(),
            Self::Auth(AuthError::LoginRejected(detail)) => Some(detail.status),
            Self::Auth(AuthError::VerificationFailed(inner)) => inner.status_code(),
            _ => None,
        }
    }

    /// Returns the API error if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Authentication(_)))
    }

    /// Returns `true` for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound(_)))
    }
}
