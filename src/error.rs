//! Error types for Enginn API operations.

use serde_json::Value;
use thiserror::Error;

/// Classification of a failed remote call, mapped 1:1 from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 407
    ProxyAuthRequired,
    /// 409
    Conflict,
    /// 422
    UnprocessableEntity,
    /// Any other 4xx status.
    ClientError,
    /// Any 5xx status, and nonstandard statuses of 600 and above.
    ServerError,
    /// The request failed before a status was received (connection refused,
    /// timeout, TLS failure...).
    NilStatus,
}

impl ErrorKind {
    /// Map a response status to an error kind.
    ///
    /// Returns `None` for statuses that are not errors (1xx, 2xx, 3xx).
    /// Statuses past 599 are not standard; they count as server errors.
    pub fn from_status(status: Option<u16>) -> Option<Self> {
        let kind = match status {
            None => Self::NilStatus,
            Some(400) => Self::BadRequest,
            Some(401) => Self::Unauthorized,
            Some(403) => Self::Forbidden,
            Some(404) => Self::NotFound,
            Some(407) => Self::ProxyAuthRequired,
            Some(409) => Self::Conflict,
            Some(422) => Self::UnprocessableEntity,
            Some(400..=499) => Self::ClientError,
            Some(500..) => Self::ServerError,
            Some(_) => return None,
        };
        Some(kind)
    }

    /// Whether this kind belongs to the 4xx family.
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::ServerError | Self::NilStatus)
    }

    /// Whether this kind belongs to the server-side family.
    ///
    /// Connection-level failures count as server-side.
    pub fn is_server_error(self) -> bool {
        matches!(self, Self::ServerError | Self::NilStatus)
    }
}

/// A failed call to the Enginn API, with the original status and body.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Enginn API error ({kind:?}, status {status:?}): {body}")]
pub struct RemoteError {
    /// Error classification.
    pub kind: ErrorKind,
    /// Response status; `None` for connection-level failures.
    pub status: Option<u16>,
    /// Response body, parsed as JSON when possible, else a JSON string.
    pub body: Value,
}

impl RemoteError {
    /// Build an error from a non-2xx response.
    ///
    /// Statuses outside the error range are classified as `ClientError`
    /// so that an unexpected 3xx still surfaces as a failure.
    pub fn from_response(status: u16, body: Value) -> Self {
        Self {
            kind: ErrorKind::from_status(Some(status)).unwrap_or(ErrorKind::ClientError),
            status: Some(status),
            body,
        }
    }

    /// Build an error for a request that never received a status.
    pub fn nil_status(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NilStatus,
            status: None,
            body: Value::String(message.into()),
        }
    }
}

/// Errors that can occur during Enginn API operations.
#[derive(Debug, Error)]
pub enum EnginnError {
    /// Configuration is missing or incomplete.
    #[error("Enginn configuration required: {0}")]
    ConfigMissing(String),

    /// The API answered with an error status, or could not be reached.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// HTTP transport error outside of a request (client setup, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The response did not follow the `{ result, pagination }` envelope.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl EnginnError {
    /// The remote error kind, if this is a remote failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Remote(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The response status, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote(e) => e.status,
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The response body of a remote failure.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Remote(e) => Some(&e.body),
            _ => None,
        }
    }

    /// Check if this error is a 404.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }
}

/// Result type alias for Enginn operations.
pub type Result<T> = core::result::Result<T, EnginnError>;
