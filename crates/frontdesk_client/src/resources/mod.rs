//! Typed path builders over `CachingClient`.
//!
//! Sub-clients hold no state of their own; every call goes through the
//! parent client's verbs, so caching and rate limiting behave identically
//! whichever entry point a caller uses.

mod conversations;
mod directory;
mod messages;
mod tags;

pub use conversations::Conversations;
pub use directory::{Contacts, Inboxes, Teammates};
pub use messages::Messages;
pub use tags::Tags;

/// Append a raw query string to `path`.
///
/// The query is used verbatim: it becomes part of the cache key, so callers
/// that want hits must pass it the same way each time.
pub(crate) fn with_query(path: String, query: Option<&str>) -> String {
    match query.map(|q| q.trim_start_matches('?')) {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path,
    }
}
