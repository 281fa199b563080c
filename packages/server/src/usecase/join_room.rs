//! UseCase: identity registration on join.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, Identity, MessagePushError, MessagePusher, PusherChannel,
    RegistryError, UserRegistry,
};

/// Validates a requested display name, reserves it in the registry and binds
/// the connection's outbound channel to the pusher.
pub struct JoinRoomUseCase {
    registry: Arc<dyn UserRegistry>,
    pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(registry: Arc<dyn UserRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// Execute the join.
    ///
    /// The identity is registered before the pusher learns about the
    /// connection, so by the time the caller announces the join every
    /// lookup already sees the new member (register-then-announce).
    pub async fn execute(
        &self,
        conn_id: ConnectionId,
        raw_name: &str,
        sender: PusherChannel,
    ) -> Result<Identity, RegistryError> {
        let name = DisplayName::new(raw_name)?;
        let identity = self.registry.register(conn_id, name).await?;
        self.pusher.register_client(conn_id, sender).await;
        Ok(identity)
    }

    /// Active display names in join order.
    pub async fn roster(&self) -> Vec<String> {
        self.registry.active_names().await
    }

    /// Fan out to every registered connection except the originator.
    pub async fn broadcast_to_others(
        &self,
        origin: &ConnectionId,
        message: &str,
    ) -> Result<(), MessagePushError> {
        let targets = self
            .registry
            .active_connections()
            .await
            .into_iter()
            .filter(|id| id != origin)
            .collect();
        self.pusher.broadcast(targets, message).await
    }

    /// Fan out to every registered connection, the originator included.
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), MessagePushError> {
        let targets = self.registry.active_connections().await;
        self.pusher.broadcast(targets, message).await
    }
}
