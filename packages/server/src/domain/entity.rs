//! Domain entities.

use super::value_object::{DisplayName, FileReference, MessageText};

/// A validated registry entry: the uniquely-named participant bound to one
/// connection. Exists only between a successful join and the unregister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Sanitized display name, case-insensitively unique among active identities
    pub name: DisplayName,
    /// Unix timestamp (milliseconds) of the successful join
    pub joined_at: i64,
    /// Number of accepted messages; informational only
    pub message_count: u64,
}

impl Identity {
    pub fn new(name: DisplayName, joined_at: i64) -> Self {
        Self {
            name,
            joined_at,
            message_count: 0,
        }
    }
}

/// Discriminates text-only messages from ones carrying a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    File,
}

/// One outbound broadcast unit. Never persisted.
///
/// Invariant, enforced by the constructor call sites: a `Text`-kind message
/// has `Some(text)`, a `File`-kind message has `Some(file)` and optional text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub sender: String,
    pub kind: MessageKind,
    pub text: Option<MessageText>,
    pub file: Option<FileReference>,
    /// Server-assigned send time, Unix milliseconds
    pub sent_at: i64,
}

impl OutboundMessage {
    pub fn new(
        sender: String,
        text: Option<MessageText>,
        file: Option<FileReference>,
        sent_at: i64,
    ) -> Self {
        let kind = if file.is_some() {
            MessageKind::File
        } else {
            MessageKind::Text
        };
        Self {
            sender,
            kind,
            text,
            file,
            sent_at,
        }
    }
}
