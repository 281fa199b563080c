//! UseCase: typing indicators.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, UserRegistry};

use super::error::TypingError;

/// Resolves a typing notification to a display name and fans it out.
///
/// Typing state is ephemeral: nothing is stored, and indicators from
/// unvalidated connections are refused.
pub struct TypingUseCase {
    registry: Arc<dyn UserRegistry>,
    pusher: Arc<dyn MessagePusher>,
}

impl TypingUseCase {
    pub fn new(registry: Arc<dyn UserRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// Returns the originator's display name for the fan-out payload.
    pub async fn started(&self, conn_id: &ConnectionId) -> Result<String, TypingError> {
        let identity = self
            .registry
            .lookup(conn_id)
            .await
            .ok_or(TypingError::NotValidated)?;
        Ok(identity.name.into_string())
    }

    pub async fn stopped(&self, conn_id: &ConnectionId) -> Result<(), TypingError> {
        self.registry
            .lookup(conn_id)
            .await
            .ok_or(TypingError::NotValidated)?;
        Ok(())
    }

    /// Fan out to every registered connection except the originator; the
    /// typist's own UI already knows it is typing.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;
    use crate::infrastructure::{InMemoryUserRegistry, WebSocketMessagePusher};
    use banter_shared::time::ManualClock;
    use tokio::sync::mpsc;

    fn create_test_registry() -> Arc<InMemoryUserRegistry> {
        Arc::new(InMemoryUserRegistry::new(Arc::new(ManualClock::new(1_000))))
    }

    #[tokio::test]
    async fn test_started_resolves_display_name() {
        // given:
        let registry = create_test_registry();
        let usecase = TypingUseCase::new(registry.clone(), Arc::new(WebSocketMessagePusher::new()));
        let conn = ConnectionId::generate();
        registry
            .register(conn, DisplayName::new("Alice").unwrap())
            .await
            .unwrap();

        // when:
        let name = usecase.started(&conn).await;

        // then:
        assert_eq!(name, Ok("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_unvalidated_connection_is_rejected() {
        // given:
        let usecase = TypingUseCase::new(
            create_test_registry(),
            Arc::new(WebSocketMessagePusher::new()),
        );
        let conn = ConnectionId::generate();

        // when / then:
        assert_eq!(usecase.started(&conn).await, Err(TypingError::NotValidated));
        assert_eq!(usecase.stopped(&conn).await, Err(TypingError::NotValidated));
    }

    #[tokio::test]
    async fn test_broadcast_excludes_typist() {
        // given:
        let registry = create_test_registry();
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = TypingUseCase::new(registry.clone(), pusher.clone());
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry
            .register(alice, DisplayName::new("Alice").unwrap())
            .await
            .unwrap();
        registry
            .register(bob, DisplayName::new("Bob").unwrap())
            .await
            .unwrap();
        pusher.register_client(alice, tx_a).await;
        pusher.register_client(bob, tx_b).await;

        // when:
        usecase
            .broadcast_to_others(&alice, "Alice is typing")
            .await
            .unwrap();

        // then:
        assert_eq!(rx_b.recv().await, Some("Alice is typing".to_string()));
        assert!(rx_a.try_recv().is_err());
    }
}
