//! The seam between the caching client and whatever speaks HTTP.

use async_trait::async_trait;
use frontdesk_error::UpstreamError;
use serde_json::Value as JsonValue;

/// HTTP verbs the client forwards to its transport.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// Cached read
    Get,
    /// Create
    Post,
    /// Partial update
    Patch,
    /// Replace
    Put,
    /// Remove
    Delete,
}

impl Method {
    /// True for verbs that may change upstream state.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Sends one request to the inbox API.
///
/// Implementations own authentication, base URL handling and JSON
/// (de)serialization. Non-success responses must surface as
/// `UpstreamErrorKind::Status` so that 429s (and their `Retry-After`) can be
/// recognised by the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `method path` with an optional JSON body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_get_is_read_only() {
        let mutating: Vec<_> = Method::iter().filter(|m| m.is_mutating()).collect();
        assert_eq!(
            mutating,
            vec![Method::Post, Method::Patch, Method::Put, Method::Delete]
        );
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::from_str("DELETE").unwrap(), Method::Delete);
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
