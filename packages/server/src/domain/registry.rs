//! User registry trait.
//!
//! The single shared mutable resource of the broadcast core. The use-case
//! layer depends on this trait; the in-memory implementation lives in the
//! infrastructure layer.

use async_trait::async_trait;

use super::entity::Identity;
use super::error::RegistryError;
use super::value_object::{ConnectionId, DisplayName};

/// Concurrent registry of active identities, keyed by connection id.
///
/// Implementations must make each mutation atomic with respect to concurrent
/// callers, and reads must observe a consistent snapshot. Iteration order of
/// `active_names` / `active_connections` is join order.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Insert an identity for the connection.
    ///
    /// Fails with [`RegistryError::Taken`] when an active identity already
    /// holds the same name case-insensitively, and with
    /// [`RegistryError::AlreadyRegistered`] when the connection itself is
    /// already bound to an identity. On success the identity is
    /// visible to all subsequent lookups before the caller's broadcast step
    /// runs (register-then-announce ordering).
    async fn register(
        &self,
        conn_id: ConnectionId,
        name: DisplayName,
    ) -> Result<Identity, RegistryError>;

    /// Remove and return the identity for the connection.
    ///
    /// Idempotent: unregistering a connection with no identity returns `None`.
    async fn unregister(&self, conn_id: &ConnectionId) -> Option<Identity>;

    /// Fetch the identity for the connection, if validated.
    async fn lookup(&self, conn_id: &ConnectionId) -> Option<Identity>;

    /// Display names of all active identities, in join order.
    async fn active_names(&self) -> Vec<String>;

    /// Connection ids of all active identities, in join order.
    async fn active_connections(&self) -> Vec<ConnectionId>;

    /// Bump the informational message counter for the connection, if present.
    async fn record_message(&self, conn_id: &ConnectionId);
}
