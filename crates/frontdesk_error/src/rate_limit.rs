//! Rate limiter admission errors.

/// Reasons an admission request can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RateLimitErrorKind {
    /// The waiter queue is at capacity; the request was refused without waiting.
    #[display("Rate limit queue full ({} waiters queued)", depth)]
    QueueFull {
        /// Queue depth at the time of refusal
        depth: usize,
    },
    /// The limiter was reset while this request was queued.
    #[display("Rate limiter was reset while request was queued")]
    Reset,
    /// The limiter configuration cannot admit any request.
    #[display("Invalid rate limiter configuration: {}", _0)]
    InvalidConfig(String),
}

/// Rate limiter error with source location tracking.
///
/// # Examples
///
/// ```
/// use frontdesk_error::{RateLimitError, RateLimitErrorKind};
///
/// let err = RateLimitError::new(RateLimitErrorKind::QueueFull { depth: 8 });
/// assert!(err.is_queue_full());
/// assert!(format!("{}", err).contains("queue full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rate Limit Error: {} at line {} in {}", kind, line, file)]
pub struct RateLimitError {
    /// The kind of error that occurred
    pub kind: RateLimitErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RateLimitError {
    /// Create a new RateLimitError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }

    /// True when the request was refused because the queue was full.
    pub fn is_queue_full(&self) -> bool {
        matches!(self.kind, RateLimitErrorKind::QueueFull { .. })
    }

    /// True when the request was rejected by a limiter reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, RateLimitErrorKind::Reset)
    }
}
