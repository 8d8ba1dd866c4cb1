//! Behavioural tests for the rate limiter.
//!
//! All tests run on tokio's paused clock, so waiting for a window or a
//! cooldown costs no wall-clock time.

use frontdesk_rate_limit::{LimiterStats, RateLimiter, RateLimiterConfig};
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

fn limiter(max_requests: u32, window_ms: u64, min_gap_ms: u64, depth: usize) -> RateLimiter {
    RateLimiter::new(
        RateLimiterConfig::default()
            .with_max_requests(max_requests)
            .with_window_ms(window_ms)
            .with_min_gap_ms(min_gap_ms)
            .with_max_queue_depth(depth),
    )
    .expect("valid config")
}

/// Spawn an `acquire()` on its own task.
fn spawn_acquire(
    limiter: &RateLimiter,
) -> tokio::task::JoinHandle<Result<(), frontdesk_error::RateLimitError>> {
    let limiter = limiter.clone();
    tokio::spawn(async move { limiter.acquire().await })
}

/// Yield until the limiter reports `n` queued waiters.
async fn wait_for_queued(limiter: &RateLimiter, n: usize) {
    for _ in 0..100 {
        if limiter.stats().queued == n {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("expected {} queued waiters, found {}", n, limiter.stats().queued);
}

#[tokio::test(start_paused = true)]
async fn test_window_budget_delays_extra_request() {
    let limiter = limiter(3, 1_000, 0, 10);
    let start = Instant::now();

    for _ in 0..3 {
        limiter.acquire().await.unwrap();
    }
    assert_eq!(start.elapsed(), Duration::ZERO, "budget should admit without delay");

    limiter.acquire().await.unwrap();
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(1_000), "waited {:?}", waited);
    assert!(waited < Duration::from_millis(1_010), "waited {:?}", waited);
}

#[tokio::test(start_paused = true)]
async fn test_min_gap_spacing() {
    let limiter = limiter(10, 60_000, 250, 10);
    let mut admitted = Vec::new();

    for _ in 0..4 {
        limiter.acquire().await.unwrap();
        admitted.push(Instant::now());
    }

    for pair in admitted.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= Duration::from_millis(250), "gap was {:?}", gap);
    }
}

#[tokio::test(start_paused = true)]
async fn test_queue_full_rejects_without_blocking() {
    let limiter = limiter(1, 1_000, 0, 2);
    limiter.acquire().await.unwrap();

    let first = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;
    let second = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 2).await;

    let err = limiter
        .acquire()
        .now_or_never()
        .expect("queue-full must not suspend")
        .unwrap_err();
    assert!(err.is_queue_full());

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_blocks_admissions() {
    let limiter = limiter(10, 1_000, 0, 10);
    limiter.record_429(Duration::from_secs(5));

    let start = Instant::now();
    limiter.acquire().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_holds_already_queued_waiters() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.acquire().await.unwrap();

    let start = Instant::now();
    let waiter = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;

    // Window frees at t=1000, but the cooldown runs to t=3000.
    limiter.record_429(Duration::from_secs(3));

    tokio::time::advance(Duration::from_millis(2_000)).await;
    assert_eq!(limiter.stats().queued, 1, "waiter admitted during cooldown");

    waiter.await.unwrap().unwrap();
    assert!(start.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_shorter_retry_after_does_not_shorten_cooldown() {
    let limiter = limiter(10, 1_000, 0, 10);
    limiter.record_429(Duration::from_secs(10));
    limiter.record_429(Duration::from_secs(1));

    let remaining = limiter.stats().cooldown_remaining_ms.unwrap();
    assert!(remaining > 9_000, "cooldown shortened to {}ms", remaining);

    let start = Instant::now();
    limiter.acquire().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn test_longer_retry_after_extends_cooldown() {
    let limiter = limiter(10, 1_000, 0, 10);
    limiter.record_429(Duration::from_secs(1));
    limiter.record_429(Duration::from_secs(4));

    let start = Instant::now();
    limiter.acquire().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_huge_retry_after_is_clamped_not_overflowed() {
    let limiter = limiter(10, 1_000, 0, 10);
    limiter.record_429(Duration::from_secs(10_000_000_000_000_000_000));
    limiter.record_429(Duration::MAX);

    let thirty_years_ms = 30 * 365 * 24 * 60 * 60 * 1_000;
    assert_eq!(limiter.stats().cooldown_remaining_ms, Some(thirty_years_ms));
    assert!(!limiter.try_acquire());

    // A queued waiter parks behind the cooldown until reset releases it.
    let waiter = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;
    limiter.reset();
    assert!(waiter.await.unwrap().unwrap_err().is_reset());
    assert!(limiter.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn test_reset_rejects_queued_waiters() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.acquire().await.unwrap();

    let waiter = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;

    limiter.reset();

    let err = waiter.await.unwrap().unwrap_err();
    assert!(err.is_reset());
    let stats = limiter.stats();
    assert_eq!(stats.requests_in_window, 0);
    assert_eq!(stats.queued, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reset_clears_cooldown() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.record_429(Duration::from_secs(60));
    limiter.reset();

    assert!(limiter.stats().cooldown_remaining_ms.is_none());
    assert!(limiter.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn test_queued_request_resolves_when_window_slides() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.acquire().await.unwrap();

    let second = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;

    tokio::time::advance(Duration::from_millis(1_000)).await;
    second.await.unwrap().unwrap();
    assert_eq!(limiter.stats().requests_in_window, 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_window_stats() {
    let limiter = limiter(2, 1_000, 0, 10);
    limiter.acquire().await.unwrap();
    limiter.acquire().await.unwrap();

    assert_eq!(
        limiter.stats(),
        LimiterStats {
            requests_in_window: 2,
            max_requests: 2,
            utilization_pct: 100,
            queued: 0,
            cooldown_remaining_ms: None,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_stats_ignore_expired_entries() {
    let limiter = limiter(4, 1_000, 0, 10);
    limiter.acquire().await.unwrap();
    assert_eq!(limiter.stats().utilization_pct, 25);

    tokio::time::advance(Duration::from_millis(1_001)).await;
    assert_eq!(limiter.stats().requests_in_window, 0);
    assert_eq!(limiter.stats().utilization_pct, 0);
}

#[tokio::test(start_paused = true)]
async fn test_waiters_admitted_in_arrival_order() {
    let limiter = limiter(1, 100, 0, 10);
    limiter.acquire().await.unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let mut handles = Vec::new();
    for i in 0..5 {
        let limiter_clone = limiter.clone();
        let order = order.clone();
        handles.push(tokio::spawn(async move {
            limiter_clone.acquire().await.unwrap();
            order.lock().unwrap().push(i);
        }));
        wait_for_queued(&limiter, i + 1).await;
    }

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn test_new_caller_cannot_overtake_queue() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.acquire().await.unwrap();

    let queued = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;

    // Window has room again, but the queued waiter still goes first.
    tokio::time::advance(Duration::from_millis(1_000)).await;
    let late = spawn_acquire(&limiter);

    queued.await.unwrap().unwrap();
    assert!(!late.is_finished());
    late.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_dropped_waiter_leaves_queue() {
    let limiter = limiter(1, 1_000, 0, 10);
    limiter.acquire().await.unwrap();

    let abandoned = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 1).await;
    let kept = spawn_acquire(&limiter);
    wait_for_queued(&limiter, 2).await;

    abandoned.abort();
    wait_for_queued(&limiter, 1).await;
    assert!(abandoned.await.unwrap_err().is_cancelled());

    kept.await.unwrap().unwrap();
    assert_eq!(limiter.stats().requests_in_window, 1);
}

#[test]
fn test_zero_budget_is_rejected() {
    let err = RateLimiter::new(RateLimiterConfig::default().with_max_requests(0)).unwrap_err();
    assert!(!err.is_queue_full());
    assert!(!err.is_reset());
}
