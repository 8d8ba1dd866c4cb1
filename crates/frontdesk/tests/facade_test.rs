//! End-to-end checks through the facade re-exports.

use async_trait::async_trait;
use frontdesk::{
    CachingClient, FrontContext, Method, RateLimitErrorKind, RateLimiter, RateLimiterConfig,
    Transport, UpstreamError,
};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(
        &self,
        _method: Method,
        path: &str,
        _body: Option<&JsonValue>,
    ) -> Result<JsonValue, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "path": path, "call": call }))
    }
}

fn single_slot_context() -> (Arc<CountingTransport>, FrontContext) {
    let transport = Arc::new(CountingTransport::default());
    let limiter = RateLimiter::new(
        RateLimiterConfig::default()
            .with_max_requests(1)
            .with_window_ms(60_000)
            .with_max_queue_depth(0),
    )
    .unwrap();
    let client = CachingClient::new(transport.clone(), limiter);
    (transport, FrontContext::new(client))
}

#[tokio::test(start_paused = true)]
async fn test_cached_reads_survive_an_exhausted_budget() {
    let (transport, ctx) = single_slot_context();

    let first = ctx.inbox().teammates().list().await.unwrap();
    let second = ctx.inbox().teammates().list().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.inbox().stats().utilization_pct, 100);
}

#[tokio::test(start_paused = true)]
async fn test_queue_full_surfaces_as_rate_limit_error() {
    let (transport, ctx) = single_slot_context();

    ctx.inbox().inboxes().list().await.unwrap();
    let err = ctx.inbox().teammates().list().await.unwrap_err();

    let limit = err.as_rate_limit().expect("rate limit error");
    assert!(matches!(limit.kind(), RateLimitErrorKind::QueueFull { depth: 0 }));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_front_cache_refetches_and_frees_budget() {
    let (transport, ctx) = single_slot_context();

    ctx.inbox().inboxes().list().await.unwrap();
    ctx.reset_front_cache().await;

    assert_eq!(ctx.inbox().stats().requests_in_window, 0);
    assert_eq!(ctx.inbox().cache_stats().await.entries, 0);

    let refetched = ctx.inbox().inboxes().list().await.unwrap();
    assert_eq!(refetched["call"], 2);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}
