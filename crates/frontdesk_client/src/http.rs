//! `reqwest`-backed transport for the inbox API.

use crate::{Method, Transport};
use async_trait::async_trait;
use frontdesk_error::{UpstreamError, UpstreamErrorKind};
use frontdesk_rate_limit::{RateLimitHeaders, parse_retry_after};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Longest response-body excerpt kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Bearer-token JSON transport.
///
/// # Example
///
/// ```no_run
/// use frontdesk_client::ReqwestTransport;
///
/// let transport = ReqwestTransport::new("https://api2.frontapp.com", "token")?;
/// # Ok::<(), frontdesk_error::UpstreamError>(())
/// ```
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a transport with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("frontdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                UpstreamError::new(UpstreamErrorKind::Transport(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, method, body), fields(method = %method))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, UpstreamError> {
        let mut request = self
            .client
            .request(method.into(), self.url(path))
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::new(UpstreamErrorKind::Transport(e.to_string())))?;

        let status = response.status();
        let reported = RateLimitHeaders::from_headers(response.headers());

        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let text = response.text().await.unwrap_or_default();
            let message = excerpt(&text, status.canonical_reason().unwrap_or("error"));
            warn!(status = status.as_u16(), ?retry_after, "Upstream returned error status");
            return Err(UpstreamError::status(status.as_u16(), message, retry_after));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::new(UpstreamErrorKind::Transport(e.to_string())))?;
        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            remaining = ?reported.and_then(|r| r.remaining),
            "Upstream responded"
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonValue::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::new(UpstreamErrorKind::Decode(e.to_string())))
    }
}

fn excerpt(body: &str, fallback: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return fallback.to_string();
    }
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new(), "http://api/", "t");
        assert_eq!(transport.url("/teammates"), "http://api/teammates");
        assert_eq!(transport.url("teammates"), "http://api/teammates");
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let cut = excerpt(&long, "error");
        assert_eq!(cut.len(), MAX_ERROR_BODY + 3);
        assert_eq!(excerpt("   ", "Not Found"), "Not Found");
    }
}
