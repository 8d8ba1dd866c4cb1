//! Error types for the Frontdesk access layer.
//!
//! This crate provides the error types shared by the rate limiter, the
//! response cache and the caching client.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use frontdesk_error::{FrontdeskResult, UpstreamError, UpstreamErrorKind};
//!
//! fn fetch_conversation() -> FrontdeskResult<String> {
//!     Err(UpstreamError::new(UpstreamErrorKind::Transport(
//!         "Connection refused".to_string(),
//!     )))?
//! }
//!
//! match fetch_conversation() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod rate_limit;
mod upstream;

pub use config::ConfigError;
pub use error::{FrontdeskError, FrontdeskErrorKind, FrontdeskResult};
pub use rate_limit::{RateLimitError, RateLimitErrorKind};
pub use upstream::{UpstreamError, UpstreamErrorKind};
