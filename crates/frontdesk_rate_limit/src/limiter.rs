//! Sliding-window rate limiter with a bounded FIFO waiter queue.
//!
//! The limiter enforces three constraints before admitting a request:
//! - **Window budget**: at most `max_requests` admissions within any `window_ms`
//! - **Minimum gap**: consecutive admissions are at least `min_gap_ms` apart
//! - **Cooldown**: after an upstream 429, nothing is admitted until it expires
//!
//! Requests that cannot be admitted immediately park on a oneshot channel in
//! arrival order. A single timer task, rescheduled on every state change,
//! wakes at the earliest instant the head of the queue could be admitted and
//! drains as many waiters as the constraints allow.

use crate::{LimiterStats, RateLimiterConfig};
use frontdesk_error::{RateLimitError, RateLimitErrorKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

type Admission = Result<(), RateLimitError>;

/// Longest cooldown `record_429` will honour (30 years); longer values are clamped.
const MAX_COOLDOWN: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

struct Waiter {
    id: u64,
    tx: oneshot::Sender<Admission>,
}

struct LimiterState {
    admission_log: VecDeque<Instant>,
    last_admission_at: Option<Instant>,
    cooldown_until: Option<Instant>,
    waiters: VecDeque<Waiter>,
    next_waiter_id: u64,
    // Bumped whenever the drain timer is replaced; stale timers see a mismatch and exit.
    timer_generation: u64,
    timer: Option<JoinHandle<()>>,
    runtime: Option<Handle>,
}

impl LimiterState {
    fn new(config: &RateLimiterConfig) -> Self {
        Self {
            admission_log: VecDeque::with_capacity(*config.max_requests() as usize),
            last_admission_at: None,
            cooldown_until: None,
            waiters: VecDeque::new(),
            next_waiter_id: 0,
            timer_generation: 0,
            timer: None,
            runtime: None,
        }
    }

    fn prune(&mut self, window: Duration, now: Instant) {
        while let Some(&oldest) = self.admission_log.front() {
            if oldest + window <= now {
                self.admission_log.pop_front();
            } else {
                break;
            }
        }
    }

    fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    fn can_admit(&self, config: &RateLimiterConfig, now: Instant) -> bool {
        if self.in_cooldown(now) {
            return false;
        }
        if self.admission_log.len() >= *config.max_requests() as usize {
            return false;
        }
        match self.last_admission_at {
            Some(last) => now.duration_since(last) >= config.min_gap(),
            None => true,
        }
    }

    fn admit(&mut self, now: Instant) {
        self.admission_log.push_back(now);
        self.last_admission_at = Some(now);
    }

    /// Earliest instant at which every constraint could be satisfied.
    fn next_ready_at(&self, config: &RateLimiterConfig, now: Instant) -> Instant {
        let mut at = now;
        if let Some(until) = self.cooldown_until {
            at = at.max(until);
        }
        let max = *config.max_requests() as usize;
        if self.admission_log.len() >= max {
            // The entry that must age out before a slot frees up.
            let blocking = self.admission_log[self.admission_log.len() - max];
            at = at.max(blocking + config.window());
        }
        if let Some(last) = self.last_admission_at {
            at = at.max(last + config.min_gap());
        }
        at
    }

    fn cancel_timer(&mut self) {
        self.timer_generation = self.timer_generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct LimiterInner {
    config: RateLimiterConfig,
    state: Mutex<LimiterState>,
}

/// Admission controller shared by every caller of one upstream API.
///
/// Cloning is cheap and yields a handle to the same limiter; all clones see
/// the same window, queue and cooldown.
///
/// # Example
///
/// ```rust,ignore
/// use frontdesk_rate_limit::{RateLimiter, RateLimiterConfig};
///
/// let limiter = RateLimiter::new(RateLimiterConfig::default())?;
///
/// limiter.acquire().await?;
/// let response = transport.send(request).await;
/// if let Err(e) = &response && e.is_rate_limited() {
///     limiter.record_429(e.retry_after().unwrap_or(limiter.config().default_retry_after()));
/// }
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<LimiterInner>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Create a limiter for the given budget.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the budget could never admit a request.
    #[instrument(skip(config), fields(
        max_requests = config.max_requests(),
        window_ms = config.window_ms(),
        min_gap_ms = config.min_gap_ms(),
        max_queue_depth = config.max_queue_depth()
    ))]
    pub fn new(config: RateLimiterConfig) -> Result<Self, RateLimitError> {
        config.validate()?;
        debug!("Creating rate limiter");
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: RateLimiterConfig) -> Self {
        let state = Mutex::new(LimiterState::new(&config));
        Self {
            inner: Arc::new(LimiterInner { config, state }),
        }
    }

    /// The budget this limiter enforces.
    pub fn config(&self) -> &RateLimiterConfig {
        &self.inner.config
    }

    /// Request one admission slot, waiting in FIFO order if necessary.
    ///
    /// Dropping the returned future before it completes withdraws the request
    /// from the queue without affecting other waiters.
    ///
    /// # Errors
    ///
    /// - `QueueFull` immediately, if the waiter queue is at `max_queue_depth`
    /// - `Reset`, if `reset()` is called while this request is queued
    pub async fn acquire(&self) -> Result<(), RateLimitError> {
        let (id, rx) = {
            let mut state = self.lock();
            let now = Instant::now();
            state.prune(self.inner.config.window(), now);

            if state.waiters.is_empty() && state.can_admit(&self.inner.config, now) {
                state.admit(now);
                debug!(
                    in_window = state.admission_log.len(),
                    "Admitted request immediately"
                );
                return Ok(());
            }

            let depth = state.waiters.len();
            if depth >= *self.inner.config.max_queue_depth() {
                warn!(depth, "Rate limit queue full, rejecting request");
                return Err(RateLimitError::new(RateLimitErrorKind::QueueFull { depth }));
            }

            let (tx, rx) = oneshot::channel();
            let id = state.next_waiter_id;
            state.next_waiter_id = state.next_waiter_id.wrapping_add(1);
            state.waiters.push_back(Waiter { id, tx });
            if state.runtime.is_none() {
                state.runtime = Handle::try_current().ok();
            }
            debug!(
                waiter = id,
                queued = state.waiters.len(),
                "Request queued for admission"
            );
            self.reschedule(&mut state, now);
            (id, rx)
        };

        let mut ticket = QueuedTicket {
            limiter: self,
            id,
            settled: false,
        };
        let admission = rx
            .await
            .unwrap_or_else(|_| Err(RateLimitError::new(RateLimitErrorKind::Reset)));
        ticket.settled = true;
        admission
    }

    /// Admit a request only if that is possible right now; never queues.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.lock();
        let now = Instant::now();
        state.prune(self.inner.config.window(), now);
        if state.waiters.is_empty() && state.can_admit(&self.inner.config, now) {
            state.admit(now);
            true
        } else {
            false
        }
    }

    /// Enter (or extend) a cooldown after the upstream answered 429.
    ///
    /// An existing cooldown that ends later than `now + retry_after` is kept.
    /// `retry_after` is clamped to 30 years.
    #[instrument(skip(self), fields(retry_after_ms = retry_after.as_millis() as u64))]
    pub fn record_429(&self, retry_after: Duration) {
        let mut state = self.lock();
        let now = Instant::now();
        let until = now + retry_after.min(MAX_COOLDOWN);
        match state.cooldown_until {
            Some(existing) if existing >= until => {
                debug!(
                    remaining_ms = existing.duration_since(now).as_millis() as u64,
                    "Keeping longer existing cooldown"
                );
            }
            _ => {
                warn!("Upstream rate limited, entering cooldown");
                state.cooldown_until = Some(until);
            }
        }
        self.reschedule(&mut state, now);
    }

    /// Snapshot of current window usage.
    pub fn stats(&self) -> LimiterStats {
        let mut state = self.lock();
        let now = Instant::now();
        state.prune(self.inner.config.window(), now);
        let requests_in_window = state.admission_log.len() as u32;
        let max_requests = *self.inner.config.max_requests();
        let cooldown_remaining_ms = state
            .cooldown_until
            .map(|until| until.saturating_duration_since(now))
            .filter(|remaining| !remaining.is_zero())
            .map(|remaining| remaining.as_millis() as u64);

        LimiterStats {
            requests_in_window,
            max_requests,
            utilization_pct: utilization_pct(requests_in_window, max_requests),
            queued: state.waiters.len(),
            cooldown_remaining_ms,
        }
    }

    /// Forget all history and reject every queued waiter with `Reset`.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = self.lock();
        state.cancel_timer();
        state.admission_log.clear();
        state.last_admission_at = None;
        state.cooldown_until = None;

        let rejected = state.waiters.len();
        for waiter in state.waiters.drain(..) {
            // A closed receiver means the caller already gave up.
            let _ = waiter
                .tx
                .send(Err(RateLimitError::new(RateLimitErrorKind::Reset)));
        }
        info!(rejected, "Rate limiter reset");
    }

    fn lock(&self) -> MutexGuard<'_, LimiterState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the drain timer with one that fires when the head waiter
    /// could next be admitted. No timer is kept while the queue is empty.
    fn reschedule(&self, state: &mut LimiterState, now: Instant) {
        state.cancel_timer();
        if state.waiters.is_empty() {
            return;
        }

        let Some(runtime) = state.runtime.clone() else {
            warn!("No tokio runtime available to schedule queued admissions");
            return;
        };

        let deadline = state.next_ready_at(&self.inner.config, now);
        let generation = state.timer_generation;
        let weak: Weak<LimiterInner> = Arc::downgrade(&self.inner);
        debug!(
            wait_ms = deadline.saturating_duration_since(now).as_millis() as u64,
            queued = state.waiters.len(),
            "Scheduled queue drain"
        );

        state.timer = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = weak.upgrade() {
                RateLimiter { inner }.on_timer(generation);
            }
        }));
    }

    fn on_timer(&self, generation: u64) {
        let mut state = self.lock();
        if state.timer_generation != generation {
            return;
        }
        // This task is the timer; drop its handle instead of aborting ourselves.
        state.timer = None;
        self.drain(&mut state);
    }

    fn drain(&self, state: &mut LimiterState) {
        let now = Instant::now();
        state.prune(self.inner.config.window(), now);

        while !state.waiters.is_empty() && state.can_admit(&self.inner.config, now) {
            let Some(waiter) = state.waiters.pop_front() else {
                break;
            };
            if waiter.tx.send(Ok(())).is_ok() {
                state.admit(now);
                debug!(
                    waiter = waiter.id,
                    in_window = state.admission_log.len(),
                    "Admitted queued request"
                );
            } else {
                debug!(waiter = waiter.id, "Skipping abandoned waiter");
            }
        }

        self.reschedule(state, now);
    }

    fn withdraw(&self, id: u64) {
        let mut state = self.lock();
        let Some(pos) = state.waiters.iter().position(|w| w.id == id) else {
            return;
        };
        state.waiters.remove(pos);
        debug!(waiter = id, "Queued request withdrawn");
        // The head may have changed, so the deadline may have too.
        if pos == 0 {
            self.reschedule(&mut state, Instant::now());
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_validated(RateLimiterConfig::default())
    }
}

/// Removes a waiter from the queue when its `acquire()` future is dropped early.
struct QueuedTicket<'a> {
    limiter: &'a RateLimiter,
    id: u64,
    settled: bool,
}

impl Drop for QueuedTicket<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.limiter.withdraw(self.id);
        }
    }
}

fn utilization_pct(requests_in_window: u32, max_requests: u32) -> u32 {
    if max_requests == 0 {
        return 0;
    }
    (100.0 * f64::from(requests_in_window) / f64::from(max_requests)).round() as u32
}
