//! Frontdesk - rate-limited, caching access to a support inbox API
//!
//! Every call to the inbox API goes through one `CachingClient`, which:
//!
//! - **Rate limits**: sliding-window budget, minimum gap between requests,
//!   bounded FIFO queue, cooldown after 429 responses
//! - **Caches reads**: repeated `GET`s are served from memory without
//!   consuming budget
//! - **Invalidates on writes**: any successful `POST`/`PATCH`/`PUT`/`DELETE`
//!   evicts cached reads
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use frontdesk::{FrontContext, FrontdeskConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = FrontContext::from_config(&FrontdeskConfig::load()?)?;
//!     let teammates = ctx.inbox().teammates().list().await?;
//!     println!("{teammates}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `frontdesk_error` - Error types
//! - `frontdesk_rate_limit` - Admission control
//! - `frontdesk_cache` - Read cache and invalidation
//! - `frontdesk_client` - Transport seam, caching client, resource clients
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]

mod observability;

pub use observability::{LoggingConfig, init_logging};

pub use frontdesk_error::{
    ConfigError, FrontdeskError, FrontdeskErrorKind, FrontdeskResult, RateLimitError,
    RateLimitErrorKind, UpstreamError, UpstreamErrorKind,
};

pub use frontdesk_rate_limit::{
    LimiterStats, RateLimitHeaders, RateLimiter, RateLimiterConfig, RateLimiterConfigBuilder,
    parse_retry_after,
};

pub use frontdesk_cache::{
    CacheConfig, CacheConfigBuilder, CacheStats, InvalidationScope, ResponseCache,
};

pub use frontdesk_client::{
    ApiConfig, CachingClient, Contacts, Conversations, FrontContext, FrontdeskConfig, Inboxes,
    Messages, Method, ReqwestTransport, Tags, Teammates, Transport,
};
