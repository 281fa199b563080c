//! UseCase: message validation, rate limiting and broadcast preparation.

use std::sync::Arc;

use banter_shared::time::Clock;

use crate::domain::{
    ConnectionId, FileReference, MessagePushError, MessagePusher, MessageText, MessageTextError,
    OutboundMessage, RateLimiter, UserRegistry, validation,
};

use super::error::SendMessageError;

/// Turns a raw inbound message into a broadcast-ready [`OutboundMessage`].
///
/// The flow is registry lookup, then rate limiter, then validation, in that
/// order: an unvalidated connection never consumes a rate allowance, and an
/// invalid message from a validated one still does.
pub struct SendMessageUseCase {
    registry: Arc<dyn UserRegistry>,
    limiter: Arc<dyn RateLimiter>,
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        limiter: Arc<dyn RateLimiter>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            limiter,
            pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        conn_id: ConnectionId,
        raw_text: Option<String>,
        file: Option<FileReference>,
    ) -> Result<OutboundMessage, SendMessageError> {
        let identity = self
            .registry
            .lookup(&conn_id)
            .await
            .ok_or(SendMessageError::NotValidated)?;

        if !self.limiter.allow(&conn_id).await {
            return Err(SendMessageError::RateExceeded);
        }

        if let Some(file) = &file {
            if !validation::is_valid_file_reference(file) {
                return Err(SendMessageError::InvalidAttachment);
            }
        }

        let text = match raw_text.as_deref() {
            Some(raw) => match MessageText::new(raw) {
                Ok(text) => Some(text),
                // a file caption is optional, bare text is not
                Err(MessageTextError::Empty) if file.is_some() => None,
                Err(_) => return Err(SendMessageError::InvalidFormat),
            },
            None => None,
        };
        if text.is_none() && file.is_none() {
            return Err(SendMessageError::InvalidFormat);
        }

        self.registry.record_message(&conn_id).await;

        Ok(OutboundMessage::new(
            identity.name.into_string(),
            text,
            file,
            self.clock.now_millis(),
        ))
    }

    /// Fan out to every registered connection, the sender included; the echo
    /// back to the sender carries the server-assigned timestamp.
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), MessagePushError> {
        let targets = self.registry.active_connections().await;
        self.pusher.broadcast(targets, message).await
    }
}
