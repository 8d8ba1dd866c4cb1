//! Limiter budget configuration.
//!
//! Loaded from the `[limiter]` table of `frontdesk.toml`:
//!
//! ```toml
//! [limiter]
//! max_requests = 50
//! window_ms = 60_000
//! min_gap_ms = 200
//! max_queue_depth = 100
//! default_retry_after_ms = 30_000
//! ```

use derive_getters::Getters;
use frontdesk_error::{RateLimitError, RateLimitErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Budget for one upstream API.
///
/// # Example
///
/// ```
/// use frontdesk_rate_limit::RateLimiterConfig;
///
/// let config = RateLimiterConfig::default()
///     .with_max_requests(10)
///     .with_min_gap_ms(0);
/// assert_eq!(*config.max_requests(), 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct RateLimiterConfig {
    /// Admissions allowed per window
    #[serde(default = "default_max_requests")]
    max_requests: u32,

    /// Sliding window length (milliseconds)
    #[serde(default = "default_window_ms")]
    window_ms: u64,

    /// Minimum spacing between two admissions (milliseconds)
    #[serde(default = "default_min_gap_ms")]
    min_gap_ms: u64,

    /// Maximum number of queued waiters before requests fail fast
    #[serde(default = "default_max_queue_depth")]
    max_queue_depth: usize,

    /// Cooldown applied to a 429 that carries no usable Retry-After (milliseconds)
    #[serde(default = "default_retry_after_ms")]
    default_retry_after_ms: u64,
}

fn default_max_requests() -> u32 {
    50
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_min_gap_ms() -> u64 {
    200
}

fn default_max_queue_depth() -> usize {
    100
}

fn default_retry_after_ms() -> u64 {
    30_000
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            min_gap_ms: default_min_gap_ms(),
            max_queue_depth: default_max_queue_depth(),
            default_retry_after_ms: default_retry_after_ms(),
        }
    }
}

impl RateLimiterConfig {
    /// Creates a new config builder.
    pub fn builder() -> RateLimiterConfigBuilder {
        RateLimiterConfigBuilder::default()
    }

    /// Sliding window length.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Minimum spacing between admissions.
    pub fn min_gap(&self) -> Duration {
        Duration::from_millis(self.min_gap_ms)
    }

    /// Cooldown used when a 429 arrives without Retry-After.
    pub fn default_retry_after(&self) -> Duration {
        Duration::from_millis(self.default_retry_after_ms)
    }

    /// Rejects budgets under which nothing could ever be admitted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_requests` or `window_ms` is zero.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.max_requests == 0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidConfig(
                "max_requests must be at least 1".to_string(),
            )));
        }
        if self.window_ms == 0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidConfig(
                "window_ms must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}
