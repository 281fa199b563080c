//! Fixed-window rate limiter.
//!
//! One window per connection, created lazily on the first observed message
//! and deleted when the owning identity is unregistered.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_shared::time::Clock;

use crate::domain::{ConnectionId, RATE_WINDOW_CAP, RATE_WINDOW_MILLIS, RateLimiter};

struct RateWindow {
    count: u32,
    reset_at: i64,
}

/// Clock-injected fixed-window counter keyed by connection id.
pub struct FixedWindowRateLimiter {
    windows: Mutex<HashMap<ConnectionId, RateWindow>>,
    clock: Arc<dyn Clock>,
    window_millis: i64,
    cap: u32,
}

impl FixedWindowRateLimiter {
    /// Create a limiter with the production policy (30 messages per 60 s).
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, RATE_WINDOW_MILLIS, RATE_WINDOW_CAP)
    }

    /// Create a limiter with custom window length and cap.
    pub fn with_limits(clock: Arc<dyn Clock>, window_millis: i64, cap: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock,
            window_millis,
            cap,
        }
    }

    #[cfg(test)]
    async fn window_count(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn allow(&self, conn_id: &ConnectionId) -> bool {
        let now = self.clock.now_millis();
        let mut windows = self.windows.lock().await;
        let window = windows.entry(*conn_id).or_insert_with(|| RateWindow {
            count: 0,
            reset_at: now + self.window_millis,
        });

        if now > window.reset_at {
            window.count = 0;
            window.reset_at = now + self.window_millis;
        }

        // over-cap calls still count, so an exceeded window does not leak
        // extra allowances
        window.count += 1;
        let allowed = window.count <= self.cap;
        if !allowed {
            tracing::debug!(
                "Connection {} exceeded the rate window ({} > {})",
                conn_id,
                window.count,
                self.cap
            );
        }
        allowed
    }

    async fn remove(&self, conn_id: &ConnectionId) {
        self.windows.lock().await.remove(conn_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_shared::time::ManualClock;

    fn create_test_limiter() -> (FixedWindowRateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = FixedWindowRateLimiter::new(clock.clone());
        (limiter, clock)
    }

    #[tokio::test]
    async fn test_cap_admits_thirty_then_rejects() {
        // given:
        let (limiter, _clock) = create_test_limiter();
        let conn = ConnectionId::generate();

        // when / then: the first 30 calls in a window are admitted
        for i in 0..30 {
            assert!(limiter.allow(&conn).await, "call {} should be admitted", i + 1);
        }

        // the 31st is rejected
        assert!(!limiter.allow(&conn).await);
        // and so is everything after it in the same window
        assert!(!limiter.allow(&conn).await);
    }

    #[tokio::test]
    async fn test_window_reset_restores_allowance() {
        // given: an exhausted window
        let (limiter, clock) = create_test_limiter();
        let conn = ConnectionId::generate();
        for _ in 0..31 {
            limiter.allow(&conn).await;
        }
        assert!(!limiter.allow(&conn).await);

        // when: the window elapses
        clock.advance(60_001);

        // then:
        assert!(limiter.allow(&conn).await);
    }

    #[tokio::test]
    async fn test_windows_are_independent_per_connection() {
        // given:
        let (limiter, _clock) = create_test_limiter();
        let noisy = ConnectionId::generate();
        let quiet = ConnectionId::generate();
        for _ in 0..31 {
            limiter.allow(&noisy).await;
        }

        // when / then: the quiet connection is unaffected
        assert!(!limiter.allow(&noisy).await);
        assert!(limiter.allow(&quiet).await);
    }

    #[tokio::test]
    async fn test_windows_are_created_lazily_and_removed() {
        // given:
        let (limiter, _clock) = create_test_limiter();
        let conn = ConnectionId::generate();
        assert_eq!(limiter.window_count().await, 0);

        // when:
        limiter.allow(&conn).await;
        assert_eq!(limiter.window_count().await, 1);
        limiter.remove(&conn).await;

        // then: no entry outlives its identity
        assert_eq!(limiter.window_count().await, 0);
        // removing again is a no-op
        limiter.remove(&conn).await;
    }

    #[tokio::test]
    async fn test_custom_limits() {
        // given:
        let clock = Arc::new(ManualClock::new(0));
        let limiter = FixedWindowRateLimiter::with_limits(clock.clone(), 1_000, 2);
        let conn = ConnectionId::generate();

        // when / then:
        assert!(limiter.allow(&conn).await);
        assert!(limiter.allow(&conn).await);
        assert!(!limiter.allow(&conn).await);

        clock.advance(1_001);
        assert!(limiter.allow(&conn).await);
    }
}
