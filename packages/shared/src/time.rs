//! Time-related utilities with clock abstraction for testability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Manually-advanced clock for tests.
///
/// Starts at a fixed instant and only moves when `advance` is called, so
/// time-window logic can be driven deterministically.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward by the given number of milliseconds
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Get current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as a human-readable `HH:MM:SS` clock time (UTC)
pub fn format_clock_time(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    match Utc.timestamp_opt(seconds, nanos) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => "??:??:??".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // given:
        let clock = SystemClock;

        // when:
        let timestamp = clock.now_millis();

        // then:
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // given:
        let clock = SystemClock;

        // when:
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_millis();

        // then:
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_manual_clock_starts_at_given_instant() {
        // given:
        let clock = ManualClock::new(1_234_567_890_123);

        // when:
        let timestamp = clock.now_millis();

        // then:
        assert_eq!(timestamp, 1_234_567_890_123);
    }

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        // given:
        let clock = ManualClock::new(1_000);

        // when:
        let before = clock.now_millis();
        clock.advance(60_000);
        let after = clock.now_millis();

        // then:
        assert_eq!(before, 1_000);
        assert_eq!(after, 61_000);
    }

    #[test]
    fn test_format_clock_time() {
        // given:
        // 2023-01-01 12:34:56 UTC in milliseconds
        let timestamp = 1_672_576_496_000;

        // when:
        let result = format_clock_time(timestamp);

        // then:
        assert_eq!(result, "12:34:56");
    }

    #[test]
    fn test_format_clock_time_ignores_milliseconds() {
        // given:
        let timestamp = 1_672_576_496_789;

        // when:
        let result = format_clock_time(timestamp);

        // then:
        assert_eq!(result, "12:34:56");
    }
}
