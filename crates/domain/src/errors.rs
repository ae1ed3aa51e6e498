//! Error types used throughout the SDK
//!
//! Every public operation reports failures through [`NfieldError`]. The
//! status-code half of the taxonomy lives in [`ErrorKind::from_status`] so
//! that every domain service classifies responses the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Nfield SDK
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NfieldError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Not connected: {0}")]
    NotConnected(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Closed set of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required input missing or malformed, detected before any request
    InvalidArgument,
    /// 409
    Conflict,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 500-599
    ServerError,
    /// Transport-level failure
    Network,
    /// Response body could not be decoded
    Deserialization,
    /// Service used before its session produced a transport
    NotConnected,
    /// Invalid or missing configuration
    Config,
}

impl ErrorKind {
    /// Map an HTTP status code to the error kind it signals.
    ///
    /// Returns `None` for every status the services treat as success,
    /// which includes all 2xx codes and anything outside the table below.
    ///
    /// | Status | Kind |
    /// |---|---|
    /// | 409 | [`ErrorKind::Conflict`] |
    /// | 400 | [`ErrorKind::BadRequest`] |
    /// | 404 | [`ErrorKind::NotFound`] |
    /// | 500-599 | [`ErrorKind::ServerError`] |
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            409 => Some(Self::Conflict),
            400 => Some(Self::BadRequest),
            404 => Some(Self::NotFound),
            500..=599 => Some(Self::ServerError),
            _ => None,
        }
    }

    /// Build the error of this kind carrying `message`.
    pub fn into_error(self, message: impl Into<String>) -> NfieldError {
        let message = message.into();
        match self {
            Self::InvalidArgument => NfieldError::InvalidArgument(message),
            Self::Conflict => NfieldError::Conflict(message),
            Self::BadRequest => NfieldError::BadRequest(message),
            Self::NotFound => NfieldError::NotFound(message),
            Self::ServerError => NfieldError::ServerError(message),
            Self::Network => NfieldError::Network(message),
            Self::Deserialization => NfieldError::Deserialization(message),
            Self::NotConnected => NfieldError::NotConnected(message),
            Self::Config => NfieldError::Config(message),
        }
    }
}

impl NfieldError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ServerError(_) => ErrorKind::ServerError,
            Self::Network(_) => ErrorKind::Network,
            Self::Deserialization(_) => ErrorKind::Deserialization,
            Self::NotConnected(_) => ErrorKind::NotConnected,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The message carried by this error (the server's reason phrase for
    /// status-derived kinds).
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message)
            | Self::Conflict(message)
            | Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::ServerError(message)
            | Self::Network(message)
            | Self::Deserialization(message)
            | Self::NotConnected(message)
            | Self::Config(message) => message,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// The SDK never retries on its own; this is for callers layering their
    /// own policy on top.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::ServerError | ErrorKind::Network)
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, NfieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_matches_taxonomy() {
        assert_eq!(ErrorKind::from_status(409), Some(ErrorKind::Conflict));
        assert_eq!(ErrorKind::from_status(400), Some(ErrorKind::BadRequest));
        assert_eq!(ErrorKind::from_status(404), Some(ErrorKind::NotFound));
        assert_eq!(ErrorKind::from_status(500), Some(ErrorKind::ServerError));
        assert_eq!(ErrorKind::from_status(503), Some(ErrorKind::ServerError));
        assert_eq!(ErrorKind::from_status(599), Some(ErrorKind::ServerError));
    }

    #[test]
    fn unlisted_statuses_are_not_errors() {
        for status in [200, 201, 204, 301, 401, 403, 410, 429, 499, 600] {
            assert_eq!(ErrorKind::from_status(status), None, "status {status}");
        }
    }

    #[test]
    fn into_error_round_trips_kind_and_message() {
        let err = ErrorKind::Conflict.into_error("Conflict");
        assert_eq!(err, NfieldError::Conflict("Conflict".to_string()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Conflict");
    }

    #[test]
    fn transient_classification() {
        assert!(NfieldError::ServerError("x".into()).is_transient());
        assert!(NfieldError::Network("x".into()).is_transient());
        assert!(!NfieldError::NotFound("x".into()).is_transient());
        assert!(!NfieldError::InvalidArgument("x".into()).is_transient());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(NfieldError::BadRequest("Bad Request".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "BadRequest", "message": "Bad Request"}));
    }
}
