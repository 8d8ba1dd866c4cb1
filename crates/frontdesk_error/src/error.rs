//! Top-level error wrapper types.

use crate::{ConfigError, RateLimitError, UpstreamError};

/// Every failure the access layer can hand back to a command handler.
///
/// # Examples
///
/// ```
/// use frontdesk_error::{FrontdeskError, RateLimitError, RateLimitErrorKind};
///
/// let err: FrontdeskError = RateLimitError::new(RateLimitErrorKind::Reset).into();
/// assert!(format!("{}", err).contains("reset"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FrontdeskErrorKind {
    /// Admission refused by the rate limiter
    #[from(RateLimitError)]
    RateLimit(RateLimitError),
    /// Error returned by the inbox API or the transport
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Frontdesk error with kind discrimination.
///
/// # Examples
///
/// ```
/// use frontdesk_error::{ConfigError, FrontdeskResult};
///
/// fn might_fail() -> FrontdeskResult<()> {
///     Err(ConfigError::new("Missing base_url"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Frontdesk Error: {}", _0)]
pub struct FrontdeskError(Box<FrontdeskErrorKind>);

impl FrontdeskError {
    /// Create a new error from a kind.
    pub fn new(kind: FrontdeskErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FrontdeskErrorKind {
        &self.0
    }

    /// The upstream error, if this failure came from the API.
    pub fn as_upstream(&self) -> Option<&UpstreamError> {
        match self.kind() {
            FrontdeskErrorKind::Upstream(e) => Some(e),
            _ => None,
        }
    }

    /// The limiter error, if admission was refused.
    pub fn as_rate_limit(&self) -> Option<&RateLimitError> {
        match self.kind() {
            FrontdeskErrorKind::RateLimit(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<T> for FrontdeskError
where
    T: Into<FrontdeskErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Frontdesk operations.
pub type FrontdeskResult<T> = std::result::Result<T, FrontdeskError>;
