//! Message pusher trait.
//!
//! Abstracts delivery of serialized outbound events to live connections so
//! use cases stay independent of the WebSocket transport.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::ConnectionId;

/// Channel used to hand a serialized event to a connection's send loop
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Fan-out delivery to registered connections.
///
/// Delivery is fire-and-forget per connection: a failed send to one target
/// never blocks or fails delivery to the others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Bind a connection's outbound channel, making it a broadcast target.
    async fn register_client(&self, conn_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection's outbound channel. Idempotent.
    async fn unregister_client(&self, conn_id: &ConnectionId);

    /// Push one event to a single connection.
    async fn push_to(&self, conn_id: &ConnectionId, content: &str)
    -> Result<(), MessagePushError>;

    /// Push one event to every target connection, tolerating per-target
    /// failures.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
