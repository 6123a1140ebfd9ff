//! Error types for the Mollie client.
//!
//! [`MollieError`] separates the failure kinds a caller may want to treat
//! differently:
//!
//! - [`Configuration`](MollieError::Configuration) and
//!   [`Request`](MollieError::Request): raised before any I/O
//! - [`Api`](MollieError::Api): the API rejected the request; do not retry
//!   it unchanged
//! - [`Transport`](MollieError::Transport): network failure, timeout, or an
//!   unexpected status; safe to retry
//! - [`Decode`](MollieError::Decode): the response body did not have the
//!   expected shape
//!
//! No error is retried or swallowed inside the client.

use std::fmt::{Display, Formatter};

use http::StatusCode;
use mollie_proto::DecodeError;

use crate::config::ConfigError;
use crate::request::RequestError;
use crate::status::{Classification, classify};

/// Kind of a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API rejected the request with one of its documented statuses.
    Api,
    /// Any other non-success status.
    UnknownStatus,
}

/// A failed response: status, raw body and kind.
///
/// The body is kept verbatim; it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
    /// Failure kind.
    pub kind: ErrorKind,
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            write!(f, "HTTP {}", self.status)
        } else {
            write!(f, "HTTP {}: {}", self.status, self.body)
        }
    }
}

/// Maps a failed response to an [`ErrorInfo`].
///
/// The kind depends on the status alone, never on the body.
#[must_use]
pub fn map_error(status: StatusCode, body: String) -> ErrorInfo {
    let kind = match classify(status) {
        Classification::ApiFailure => ErrorKind::Api,
        Classification::Success | Classification::TransportFailure => ErrorKind::UnknownStatus,
    };
    ErrorInfo { status, body, kind }
}

/// Failures below the API layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request URL could not be built from the base address.
    #[error("failed to build request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, TLS, or body-read failure.
    #[error("HTTP transport error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A non-success status outside the API's documented rejection set.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(ErrorInfo),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Connection(Box::new(err))
        }
    }
}

/// Errors returned by [`MollieClient`](crate::MollieClient) operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MollieError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The API rejected the request.
    #[error("API error: {0}")]
    Api(ErrorInfo),

    /// The request did not reach the API or got an unexpected status.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<ErrorInfo> for MollieError {
    fn from(info: ErrorInfo) -> Self {
        match info.kind {
            ErrorKind::Api => Self::Api(info),
            ErrorKind::UnknownStatus => Self::Transport(TransportError::UnexpectedStatus(info)),
        }
    }
}

impl MollieError {
    /// Returns `true` if resending the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the failed response, if the error carries one.
    #[must_use]
    pub const fn error_info(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Api(info) | Self::Transport(TransportError::UnexpectedStatus(info)) => Some(info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DOMAIN_FAILURE_STATUSES;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn test_domain_statuses_map_to_api_error_with_raw_body() {
        let body = r#"{"error":{"type":"request","message":"The amount is lower than minimum"}}"#;
        for code in DOMAIN_FAILURE_STATUSES {
            let info = map_error(status(code), body.to_owned());
            assert_eq!(info.kind, ErrorKind::Api, "{code}");
            assert_eq!(info.body, body);
            assert_eq!(info.status.as_u16(), code);
            assert!(matches!(MollieError::from(info), MollieError::Api(_)));
        }
    }

    #[test]
    fn test_other_statuses_map_to_unknown_status() {
        for code in [500, 503, 599, 409] {
            let info = map_error(status(code), "upstream unavailable".into());
            assert_eq!(info.kind, ErrorKind::UnknownStatus, "{code}");
            let err = MollieError::from(info);
            assert!(matches!(
                err,
                MollieError::Transport(TransportError::UnexpectedStatus(ref info))
                    if info.status.as_u16() == code
            ));
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn test_body_content_does_not_change_kind() {
        let info = map_error(status(500), r#"{"error":{"type":"request"}}"#.into());
        assert_eq!(info.kind, ErrorKind::UnknownStatus);
        let info = map_error(status(404), "<html>gateway</html>".into());
        assert_eq!(info.kind, ErrorKind::Api);
    }

    #[test]
    fn test_api_errors_are_not_retryable() {
        let err = MollieError::from(map_error(status(422), String::new()));
        assert!(!err.is_retryable());
        assert_eq!(err.error_info().unwrap().status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_other_kinds_are_not_retryable() {
        assert!(!MollieError::from(ConfigError::EmptyApiKey).is_retryable());
        assert!(!MollieError::from(DecodeError::MissingMethod).is_retryable());
        assert!(MollieError::from(TransportError::Timeout).is_retryable());
        assert!(MollieError::from(TransportError::Timeout).error_info().is_none());
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let info = map_error(status(401), "Unauthorized request".into());
        assert_eq!(info.to_string(), "HTTP 401 Unauthorized: Unauthorized request");
        let info = map_error(status(502), String::new());
        assert_eq!(info.to_string(), "HTTP 502 Bad Gateway");
    }
}
