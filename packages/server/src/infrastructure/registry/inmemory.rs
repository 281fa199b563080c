//! In-memory user registry.
//!
//! A lock-guarded vector keyed by connection id. The vector (rather than a
//! map) keeps identities in join order, which is exactly the order the
//! roster broadcast needs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_shared::time::Clock;

use crate::domain::{ConnectionId, DisplayName, Identity, RegistryError, UserRegistry};

/// Single-process registry of active identities.
pub struct InMemoryUserRegistry {
    /// Active identities in join order
    users: Mutex<Vec<(ConnectionId, Identity)>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn register(
        &self,
        conn_id: ConnectionId,
        name: DisplayName,
    ) -> Result<Identity, RegistryError> {
        let mut users = self.users.lock().await;

        // one identity per connection
        if users.iter().any(|(cid, _)| cid == &conn_id) {
            return Err(RegistryError::AlreadyRegistered);
        }

        if users
            .iter()
            .any(|(_, identity)| identity.name.matches_ignore_case(name.as_str()))
        {
            return Err(RegistryError::Taken(name.into_string()));
        }

        let identity = Identity::new(name, self.clock.now_millis());
        users.push((conn_id, identity.clone()));
        tracing::debug!(
            "Registered '{}' for connection {} ({} active)",
            identity.name,
            conn_id,
            users.len()
        );
        Ok(identity)
    }

    async fn unregister(&self, conn_id: &ConnectionId) -> Option<Identity> {
        let mut users = self.users.lock().await;
        let pos = users.iter().position(|(cid, _)| cid == conn_id)?;
        let (_, identity) = users.remove(pos);
        tracing::debug!(
            "Unregistered '{}' for connection {} ({} active)",
            identity.name,
            conn_id,
            users.len()
        );
        Some(identity)
    }

    async fn lookup(&self, conn_id: &ConnectionId) -> Option<Identity> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|(cid, _)| cid == conn_id)
            .map(|(_, identity)| identity.clone())
    }

    async fn active_names(&self) -> Vec<String> {
        let users = self.users.lock().await;
        users
            .iter()
            .map(|(_, identity)| identity.name.as_str().to_string())
            .collect()
    }

    async fn active_connections(&self) -> Vec<ConnectionId> {
        let users = self.users.lock().await;
        users.iter().map(|(cid, _)| *cid).collect()
    }

    async fn record_message(&self, conn_id: &ConnectionId) {
        let mut users = self.users.lock().await;
        if let Some((_, identity)) = users.iter_mut().find(|(cid, _)| cid == conn_id) {
            identity.message_count += 1;
        }
    }
}
