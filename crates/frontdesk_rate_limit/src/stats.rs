//! Read-only limiter snapshots.

use serde::Serialize;

/// Window usage as of the moment `RateLimiter::stats()` was called.
///
/// Entries that have aged out of the window are never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimiterStats {
    /// Admissions inside the current window
    pub requests_in_window: u32,
    /// Configured window budget
    pub max_requests: u32,
    /// `round(100 * requests_in_window / max_requests)`
    pub utilization_pct: u32,
    /// Requests waiting for admission
    pub queued: usize,
    /// Time left in an active 429 cooldown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining_ms: Option<u64>,
}
