//! Domain error types.
//!
//! Every variant carries a human-readable message; the `Display` text is
//! what the originating connection receives in a `rejected` event.

use thiserror::Error;

use super::validation::MAX_TEXT_CHARS;
use super::value_object::ConnectionId;

/// Failure modes of identity registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(
        "display name must be 2-20 characters using letters, digits, spaces, '-', '_' or '.'"
    )]
    InvalidFormat,

    #[error("you have already joined the room")]
    AlreadyRegistered,

    #[error("the name '{0}' is reserved")]
    Forbidden(String),

    #[error("the name '{0}' is already taken")]
    Taken(String),
}

/// Failure modes of message text construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageTextError {
    #[error("message text is empty")]
    Empty,

    #[error("message text exceeds {MAX_TEXT_CHARS} characters")]
    TooLong,
}

/// Failure modes of pushing a message to a connection
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(ConnectionId),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
