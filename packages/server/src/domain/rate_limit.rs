//! Rate limiter trait and throughput policy.

use async_trait::async_trait;

use super::value_object::ConnectionId;

/// Fixed-window length in milliseconds
pub const RATE_WINDOW_MILLIS: i64 = 60_000;
/// Messages admitted per window per connection
pub const RATE_WINDOW_CAP: u32 = 30;

/// Per-connection fixed-window message counter.
///
/// Windows are created lazily on first observation and must be removed when
/// the owning connection's identity is unregistered, so the map never grows
/// without bound.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one send attempt and report whether it is within the cap.
    ///
    /// Over-cap attempts still count against the window, so exceeding it
    /// does not leak extra allowances later in the same window.
    async fn allow(&self, conn_id: &ConnectionId) -> bool;

    /// Drop the window for a connection. Idempotent.
    async fn remove(&self, conn_id: &ConnectionId);
}
