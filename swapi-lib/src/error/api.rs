//! API error types

use std::time::Duration;

use serde_json::Value;

use super::FieldValidationError;

/// Status, message and decoded body of a non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpErrorDetail {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable error message.
    pub message: String,
    /// Response body: parsed JSON, or the raw text as a JSON string.
    pub body: Value,
}

impl HttpErrorDetail {
    /// Creates a detail without a body.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: Value::Null,
        }
    }

    /// Builds the detail from a raw response body.
    ///
    /// The body is parsed as JSON when possible. For a JSON object the message
    /// is the first non-empty of `message` and `error`; otherwise it is the raw
    /// text.
    pub fn from_body(status: u16, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text).unwrap_or_else(|_| Value::String(text.to_string()));
        let message = match &body {
            Value::Object(map) => ["message", "error"]
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|value| is_truthy(value))
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| text.to_string()),
            _ => text.to_string(),
        };
        Self { status, message, body }
    }
}

impl std::fmt::Display for HttpErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Errors that can occur during API calls.
///
/// Non-2xx responses map to one variant per status class. Every HTTP variant
/// carries an [`HttpErrorDetail`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401: missing or invalid token.
    #[error("Authentication failed: {0}")]
    Authentication(HttpErrorDetail),

    /// 403: authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(HttpErrorDetail),

    /// 404: the resource does not exist.
    #[error("Not found: {0}")]
    NotFound(HttpErrorDetail),

    /// 422: the payload failed server-side validation.
    #[error("Validation failed: {detail}")]
    Validation {
        detail: HttpErrorDetail,
        /// The body's `errors` field, or the whole body when it has none.
        errors: Value,
        /// Per-field errors, when `errors` has a recognizable shape.
        fields: Vec<FieldValidationError>,
    },

    /// 429: too many requests.
    #[error("Rate limited: {detail}")]
    RateLimit {
        detail: HttpErrorDetail,
        /// Value of the `Retry-After` header, if present.
        retry_after: Option<Duration>,
    },

    /// 5xx: server-side failure.
    #[error("Server error: {0}")]
    Server(HttpErrorDetail),

    /// Any other non-2xx status.
    #[error("{0}")]
    Http(HttpErrorDetail),

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),
}

impl ApiError {
    /// Maps a non-2xx response to the most specific variant.
    pub fn from_status(detail: HttpErrorDetail, retry_after: Option<Duration>) -> Self {
        match detail.status {
            401 => Self::Authentication(detail),
            403 => Self::Forbidden(detail),
            404 => Self::NotFound(detail),
            422 => {
                let errors = match &detail.body {
                    Value::Object(map) => match map.get("errors") {
                        Some(errors) if is_truthy(errors) => errors.clone(),
                        _ => detail.body.clone(),
                    },
                    other => other.clone(),
                };
                let fields = match detail.body.get("errors") {
                    Some(explicit) => FieldValidationError::collect(explicit),
                    None => Vec::new(),
                };
                Self::Validation { detail, errors, fields }
            }
            429 => Self::RateLimit { detail, retry_after },
            status if status >= 500 => Self::Server(detail),
            _ => Self::Http(detail),
        }
    }

    /// Returns the status/message/body detail, unless this is a connection error.
    pub fn detail(&self) -> Option<&HttpErrorDetail> {
        match self {
            Self::Authentication(detail)
            | Self::Forbidden(detail)
            | Self::NotFound(detail)
            | Self::Server(detail)
            | Self::Http(detail) => Some(detail),
            Self::Validation { detail, .. } | Self::RateLimit { detail, .. } => Some(detail),
            Self::Connection(_) => None,
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        self.detail().map(|detail| detail.status)
    }

    /// Returns the error message sent by the server.
    pub fn message(&self) -> Option<&str> {
        self.detail().map(|detail| detail.message.as_str())
    }

    /// Returns `true` for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_some_and(|status| (400..500).contains(&status))
    }

    /// Returns `true` for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_some_and(|status| status >= 500)
    }
}
