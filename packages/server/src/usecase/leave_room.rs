//! UseCase: connection teardown.

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, MessagePushError, MessagePusher, RateLimiter, UserRegistry};

/// Releases everything a connection holds: its identity, its rate-limit
/// window and its pusher channel.
///
/// Every step is idempotent, so the teardown may run for connections that
/// never validated (join deadline, early disconnect) or run twice without
/// harm.
pub struct LeaveRoomUseCase {
    registry: Arc<dyn UserRegistry>,
    limiter: Arc<dyn RateLimiter>,
    pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        limiter: Arc<dyn RateLimiter>,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            limiter,
            pusher,
        }
    }

    /// Returns the released identity, or `None` if the connection never
    /// validated. The caller announces the departure only in the `Some` case.
    pub async fn execute(&self, conn_id: ConnectionId) -> Option<Identity> {
        let identity = self.registry.unregister(&conn_id).await;
        self.limiter.remove(&conn_id).await;
        self.pusher.unregister_client(&conn_id).await;
        identity
    }

    /// Active display names in join order, after the departure.
    pub async fn roster(&self) -> Vec<String> {
        self.registry.active_names().await
    }

    /// Fan out to every remaining connection.
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), MessagePushError> {
        let targets = self.registry.active_connections().await;
        self.pusher.broadcast(targets, message).await
    }
}
