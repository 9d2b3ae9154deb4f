//! Fixed-window rate limiting keyed by identifier.
//!
//! Each identifier is either inactive (no record) or active with a count and a
//! window end. The first call opens a window; calls inside it are allowed
//! until `max_attempts` is reached; once the window has passed the record is
//! dropped and the next call starts over.
//!
//! This is soft throttling for a manual click-to-chat flow, not a security
//! boundary: state lives in the limiter value and disappears with it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and give the other to a limiter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start_ms)))
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.0.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Denied; retry after this many whole seconds.
    Denied { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Allowed => None,
            Self::Denied { retry_after_secs } => Some(*retry_after_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateLimitRecord {
    count: u32,
    reset_at_ms: u64,
}

/// In-memory fixed-window limiter.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    records: HashMap<String, RateLimitRecord>,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            records: HashMap::new(),
            clock,
        }
    }

    /// Count one attempt for `id` and decide whether it may proceed.
    pub fn check(&mut self, id: &str, max_attempts: u32, window: Duration) -> RateLimitDecision {
        let now = self.clock.now_ms();

        if let Some(record) = self.records.get_mut(id) {
            if now <= record.reset_at_ms {
                if record.count >= max_attempts {
                    let remaining_ms = record.reset_at_ms - now;
                    let retry_after_secs = remaining_ms.div_ceil(1000);
                    tracing::debug!(id, retry_after_secs, "rate limit reached");
                    return RateLimitDecision::Denied { retry_after_secs };
                }
                record.count += 1;
                return RateLimitDecision::Allowed;
            }
            self.records.remove(id);
        }

        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self.records.insert(
            id.to_string(),
            RateLimitRecord {
                count: 1,
                reset_at_ms: now.saturating_add(window_ms),
            },
        );
        RateLimitDecision::Allowed
    }

    /// Drop every record whose window has passed.
    pub fn purge_expired(&mut self) {
        let now = self.clock.now_ms();
        self.records.retain(|_, record| now <= record.reset_at_ms);
    }

    /// Number of identifiers with an open record.
    pub fn tracked(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    fn limiter() -> (RateLimiter<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        (RateLimiter::with_clock(clock.clone()), clock)
    }

    #[test]
    fn fourth_attempt_in_window_is_denied() {
        let (mut limiter, _clock) = limiter();
        let results: Vec<bool> = (0..4)
            .map(|_| limiter.check("contact-form", 3, MINUTE).is_allowed())
            .collect();
        assert_eq!(results, vec![true, true, true, false]);
    }

    #[test]
    fn denial_reports_whole_seconds_rounded_up() {
        let (mut limiter, clock) = limiter();
        for _ in 0..3 {
            limiter.check("k", 3, MINUTE);
        }
        clock.advance(Duration::from_millis(10_500));
        assert_eq!(
            limiter.check("k", 3, MINUTE),
            RateLimitDecision::Denied { retry_after_secs: 50 }
        );
    }

    #[test]
    fn window_end_is_inclusive() {
        let (mut limiter, clock) = limiter();
        limiter.check("k", 1, MINUTE);
        clock.advance(MINUTE);
        assert_eq!(
            limiter.check("k", 1, MINUTE),
            RateLimitDecision::Denied { retry_after_secs: 0 }
        );
    }

    #[test]
    fn elapsed_window_resets_the_sequence() {
        let (mut limiter, clock) = limiter();
        for _ in 0..4 {
            limiter.check("k", 3, MINUTE);
        }
        clock.advance(MINUTE + Duration::from_millis(1));
        let results: Vec<bool> = (0..4)
            .map(|_| limiter.check("k", 3, MINUTE).is_allowed())
            .collect();
        assert_eq!(results, vec![true, true, true, false]);
    }

    #[test]
    fn identifiers_are_independent() {
        let (mut limiter, _clock) = limiter();
        assert!(limiter.check("a", 1, MINUTE).is_allowed());
        assert!(!limiter.check("a", 1, MINUTE).is_allowed());
        assert!(limiter.check("b", 1, MINUTE).is_allowed());
    }

    #[test]
    fn separate_limiters_do_not_share_state() {
        let (mut first, _c1) = limiter();
        let (mut second, _c2) = limiter();
        assert!(first.check("k", 1, MINUTE).is_allowed());
        assert!(second.check("k", 1, MINUTE).is_allowed());
    }

    #[test]
    fn purge_drops_only_expired_records() {
        let (mut limiter, clock) = limiter();
        limiter.check("old", 3, Duration::from_secs(1));
        limiter.check("new", 3, MINUTE);
        clock.advance(Duration::from_secs(2));
        limiter.purge_expired();
        assert_eq!(limiter.tracked(), 1);
    }

    #[test]
    fn retry_after_accessor() {
        assert_eq!(RateLimitDecision::Allowed.retry_after_secs(), None);
        assert_eq!(
            RateLimitDecision::Denied { retry_after_secs: 3 }.retry_after_secs(),
            Some(3)
        );
    }
}
