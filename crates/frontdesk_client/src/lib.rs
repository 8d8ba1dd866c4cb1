//! Rate-limited, caching client for the conversation inbox API.
//!
//! `CachingClient` is the only way callers reach the API. It consults a
//! `RateLimiter` before every upstream call, serves repeated reads from an
//! in-memory cache, and invalidates that cache after successful writes.
//!
//! ```rust,ignore
//! use frontdesk_client::{FrontContext, FrontdeskConfig};
//!
//! let ctx = FrontContext::from_config(&FrontdeskConfig::load()?)?;
//! let open = ctx.inbox().conversations().list(Some("q[statuses][]=open")).await?;
//! println!("{}", ctx.inbox().stats().utilization_pct);
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod context;
mod http;
mod resources;
mod transport;

pub use client::CachingClient;
pub use config::{ApiConfig, FrontdeskConfig};
pub use context::FrontContext;
pub use http::ReqwestTransport;
pub use resources::{Contacts, Conversations, Inboxes, Messages, Tags, Teammates};
pub use transport::{Method, Transport};
