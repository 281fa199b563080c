//! Value objects for the chat domain.
//!
//! Constructors enforce the validation rules, so holding one of these types
//! is proof the contained data already passed sanitization.

use std::fmt;

use uuid::Uuid;

use super::error::{MessageTextError, RegistryError};
use super::validation;

/// Opaque unique handle for one live transport session.
///
/// Assigned at connect time and stable for the connection's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sanitized, shape-checked display name.
///
/// Construction strips markup, trims whitespace, then enforces the 2-20
/// character shape rules and the reserved-name list. Case-insensitive
/// uniqueness among active identities is the registry's job, not this type's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Result<Self, RegistryError> {
        let name = validation::sanitize(raw).trim().to_string();
        if !validation::is_valid_display_name(&name) {
            return Err(RegistryError::InvalidFormat);
        }
        if validation::is_reserved_name(&name) {
            return Err(RegistryError::Forbidden(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Case-insensitive comparison used for uniqueness checks
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sanitized chat message text, guaranteed non-empty and within the length cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(raw: &str) -> Result<Self, MessageTextError> {
        let text = validation::sanitize(raw).trim().to_string();
        if text.is_empty() {
            return Err(MessageTextError::Empty);
        }
        if !validation::is_valid_text(&text) {
            return Err(MessageTextError::TooLong);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Metadata for a previously-uploaded file attached to a message.
///
/// Produced by the upload collaborator before any message references it. The
/// core only checks that `name` and `locator` are present; MIME type and
/// size are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub locator: String,
}
