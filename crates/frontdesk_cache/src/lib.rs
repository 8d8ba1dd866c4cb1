//! Read-through response cache for the inbox API.
//!
//! Entries are keyed by the exact read path (including query string), never
//! expire on their own, and are removed only by invalidation after a
//! successful write.

#![warn(missing_docs)]

mod cache;

pub use cache::{
    CacheConfig, CacheConfigBuilder, CacheStats, InvalidationScope, ResponseCache, resource_root,
};
