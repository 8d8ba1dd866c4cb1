//! Admission control for a rate-limited upstream API.
//!
//! This crate keeps outbound request volume under a provider-imposed budget.
//! One `RateLimiter` is created per upstream API and shared (by cloning) by
//! every caller of that API.
//!
//! ## Behaviour
//!
//! - Sliding window of `max_requests` admissions per `window_ms`
//! - Minimum `min_gap_ms` between any two admissions
//! - Bounded FIFO queue of waiters; overflow fails fast with `QueueFull`
//! - `record_429` cooldowns that block every admission until they expire
//! - `reset` rejects queued waiters so nobody hangs
//!
//! ```rust,ignore
//! use frontdesk_rate_limit::{RateLimiter, RateLimiterConfig};
//!
//! let limiter = RateLimiter::new(RateLimiterConfig::default())?;
//! limiter.acquire().await?;
//! println!("{:?}", limiter.stats());
//! ```

#![warn(missing_docs)]

mod config;
mod headers;
mod limiter;
mod stats;

pub use config::{RateLimiterConfig, RateLimiterConfigBuilder};
pub use headers::{RateLimitHeaders, parse_retry_after, parse_retry_after_at};
pub use limiter::RateLimiter;
pub use stats::LimiterStats;
