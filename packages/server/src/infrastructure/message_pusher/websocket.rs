//! WebSocket-backed message pusher.
//!
//! The WebSocket itself is created in the UI layer; this implementation
//! holds the per-connection `UnboundedSender` halves and performs the
//! fan-out. Sending into the channel never blocks, so a slow connection
//! cannot stall delivery to the others.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// Fan-out over per-connection outbound channels.
pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, conn_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(conn_id, sender);
        tracing::debug!("Connection {} registered with the pusher", conn_id);
    }

    async fn unregister_client(&self, conn_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(conn_id);
        tracing::debug!("Connection {} unregistered from the pusher", conn_id);
    }

    async fn push_to(
        &self,
        conn_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        match clients.get(conn_id) {
            Some(sender) => sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string())),
            None => Err(MessagePushError::ClientNotFound(*conn_id)),
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // per-target failures are tolerated during a broadcast
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection {}: {}", target, e);
                }
            } else {
                tracing::warn!("Connection {} not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
