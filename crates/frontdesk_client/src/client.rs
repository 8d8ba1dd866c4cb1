//! Rate-limited, caching front for a `Transport`.
//!
//! Reads are answered from the cache when possible; a cache hit never touches
//! the rate limiter. Every call that reaches the transport, read or write,
//! first acquires an admission from the limiter. Successful writes invalidate
//! the cache. Failed calls are never cached, and an upstream 429 puts the
//! limiter into cooldown before the error is returned.

use crate::resources::{Contacts, Conversations, Inboxes, Messages, Tags, Teammates};
use crate::{Method, Transport};
use frontdesk_cache::{CacheConfig, CacheStats, ResponseCache};
use frontdesk_error::FrontdeskResult;
use frontdesk_rate_limit::{LimiterStats, RateLimiter};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

struct ClientInner {
    transport: Arc<dyn Transport>,
    limiter: RateLimiter,
    cache: Mutex<ResponseCache>,
}

/// Uniform entry point for every call to one upstream API.
///
/// Cloning yields a handle to the same cache and limiter.
///
/// # Example
///
/// ```rust,ignore
/// use frontdesk_client::{CachingClient, ReqwestTransport};
/// use frontdesk_rate_limit::RateLimiter;
/// use std::sync::Arc;
///
/// let transport = Arc::new(ReqwestTransport::new(base_url, token)?);
/// let client = CachingClient::new(transport, RateLimiter::default());
///
/// let first = client.get("/conversations/cnv_1").await?;  // upstream
/// let again = client.get("/conversations/cnv_1").await?;  // cache
/// client.patch("/conversations/cnv_1", &json!({"status": "archived"})).await?;
/// let fresh = client.get("/conversations/cnv_1").await?;  // upstream again
/// ```
#[derive(Clone)]
pub struct CachingClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for CachingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingClient")
            .field("limiter", &self.inner.limiter)
            .finish_non_exhaustive()
    }
}

impl CachingClient {
    /// Wrap `transport` with the default cache configuration.
    pub fn new(transport: Arc<dyn Transport>, limiter: RateLimiter) -> Self {
        Self::with_config(transport, limiter, CacheConfig::default())
    }

    /// Wrap `transport` with an explicit cache configuration.
    pub fn with_config(
        transport: Arc<dyn Transport>,
        limiter: RateLimiter,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                limiter,
                cache: Mutex::new(ResponseCache::new(cache_config)),
            }),
        }
    }

    /// Read `path`, from the cache if present.
    ///
    /// # Errors
    ///
    /// Limiter refusals and upstream errors are returned unchanged; nothing is
    /// cached on failure.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> FrontdeskResult<JsonValue> {
        if let Some(hit) = self.inner.cache.lock().await.get(path) {
            return Ok(hit);
        }

        let value = self.dispatch(Method::Get, path, None).await?;
        self.inner.cache.lock().await.insert(path, value.clone());
        Ok(value)
    }

    /// Create a resource under `path`.
    #[instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: &JsonValue) -> FrontdeskResult<JsonValue> {
        self.mutate(Method::Post, path, Some(body)).await
    }

    /// Partially update the resource at `path`.
    #[instrument(skip(self, body))]
    pub async fn patch(&self, path: &str, body: &JsonValue) -> FrontdeskResult<JsonValue> {
        self.mutate(Method::Patch, path, Some(body)).await
    }

    /// Replace the resource at `path`.
    #[instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: &JsonValue) -> FrontdeskResult<JsonValue> {
        self.mutate(Method::Put, path, Some(body)).await
    }

    /// Delete the resource at `path`.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> FrontdeskResult<JsonValue> {
        self.mutate(Method::Delete, path, None).await
    }

    /// Window usage of the underlying limiter.
    pub fn stats(&self) -> LimiterStats {
        self.inner.limiter.stats()
    }

    /// Cache hit/miss counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.inner.cache.lock().await.stats()
    }

    /// Drop every cached response.
    pub async fn reset_cache(&self) {
        self.inner.cache.lock().await.clear();
    }

    /// Drop every cached response and reset the limiter, rejecting queued calls.
    pub async fn reset(&self) {
        self.reset_cache().await;
        self.inner.limiter.reset();
    }

    /// Conversation endpoints.
    pub fn conversations(&self) -> Conversations<'_> {
        Conversations::new(self)
    }

    /// Message endpoints.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// Tag endpoints.
    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    /// Contact endpoints.
    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self)
    }

    /// Inbox endpoints.
    pub fn inboxes(&self) -> Inboxes<'_> {
        Inboxes::new(self)
    }

    /// Teammate endpoints.
    pub fn teammates(&self) -> Teammates<'_> {
        Teammates::new(self)
    }

    async fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> FrontdeskResult<JsonValue> {
        let value = self.dispatch(method, path, body).await?;
        self.inner.cache.lock().await.invalidate_for_write(path);
        Ok(value)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> FrontdeskResult<JsonValue> {
        self.inner.limiter.acquire().await?;
        debug!(%method, path, "Admitted, sending upstream");

        match self.inner.transport.send(method, path, body).await {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_rate_limited() {
                    let retry_after = e
                        .retry_after()
                        .unwrap_or_else(|| self.inner.limiter.config().default_retry_after());
                    warn!(%method, path, ?retry_after, "Upstream returned 429");
                    self.inner.limiter.record_429(retry_after);
                }
                Err(e.into())
            }
        }
    }
}
