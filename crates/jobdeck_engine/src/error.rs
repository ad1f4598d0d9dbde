use std::fmt;

/// Failure classes for one API exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    /// The configured base URL does not parse.
    InvalidBaseUrl,
    /// The backend answered with a non-success status.
    HttpStatus(u16),
    /// The request exceeded the client timeout.
    Timeout,
    /// Connection-level failure.
    Network,
    /// The response body did not match the documented shape.
    Decode,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            ApiFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::Network => write!(f, "network error"),
            ApiFailureKind::Decode => write!(f, "decode error"),
        }
    }
}

/// A failed API exchange. `server_message` carries the backend's own
/// `error` body when the response included one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
    pub server_message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn with_server_message(mut self, message: impl Into<String>) -> Self {
        self.server_message = Some(message.into());
        self
    }

    /// Whether the query layer may try again. A 404 is terminal: the row
    /// does not exist and asking again cannot change that.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.kind, ApiFailureKind::HttpStatus(404))
    }

    /// True exactly for the not-found case, which views render as its own
    /// state rather than a generic error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ApiFailureKind::HttpStatus(404))
    }
}
