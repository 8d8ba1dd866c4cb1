//! Errors raised by the HTTP transport talking to the inbox API.

use std::time::Duration;

/// Upstream failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// The API answered with a non-success status.
    #[display("HTTP {} error: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message or response body excerpt
        message: String,
        /// Parsed `Retry-After` value, when the response carried one
        retry_after: Option<Duration>,
    },
    /// The request never produced a response (DNS, TLS, connection reset).
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The response body could not be decoded.
    #[display("Response decode failed: {}", _0)]
    Decode(String),
}

/// Upstream error with source location tracking.
///
/// # Examples
///
/// ```
/// use frontdesk_error::{UpstreamError, UpstreamErrorKind};
/// use std::time::Duration;
///
/// let err = UpstreamError::new(UpstreamErrorKind::Status {
///     status: 429,
///     message: "Too Many Requests".to_string(),
///     retry_after: Some(Duration::from_secs(2)),
/// });
///
/// assert!(err.is_rate_limited());
/// assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a status error.
    #[track_caller]
    pub fn status(status: u16, message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::new(UpstreamErrorKind::Status {
            status,
            message: message.into(),
            retry_after,
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UpstreamErrorKind {
        &self.kind
    }

    /// HTTP status code, if the API responded at all.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            UpstreamErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// `Retry-After` supplied by the API, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            UpstreamErrorKind::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
