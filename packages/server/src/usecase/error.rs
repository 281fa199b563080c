//! Use-case error types.
//!
//! The `Display` text of each variant is sent verbatim to the originating
//! connection as the `rejected` reason. Join failures reuse
//! [`crate::domain::RegistryError`] directly since registration is the whole
//! of that operation.

use thiserror::Error;

/// Failure modes of sending a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("you are not part of the room yet")]
    NotValidated,

    #[error("slow down - you are sending messages too fast")]
    RateExceeded,

    #[error("message must contain text (up to 500 characters) or a file")]
    InvalidFormat,

    #[error("file attachment is missing its name or download locator")]
    InvalidAttachment,
}

/// Failure modes of a typing indicator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingError {
    #[error("you are not part of the room yet")]
    NotValidated,
}
