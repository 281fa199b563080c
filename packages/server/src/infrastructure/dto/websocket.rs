//! WebSocket wire events.
//!
//! Every frame is a JSON object discriminated by a `type` field. Inbound
//! events flow connection → core, outbound events core → connection.

use serde::{Deserialize, Serialize};

/// Inbound events sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Claim a display identity; the only event accepted before validation
    Join { display_name: String },
    /// Chat message; a present `file` makes it a file-kind message
    Message {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        file: Option<FileReferenceDto>,
    },
    Typing,
    StopTyping,
}

/// Outbound events pushed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Someone joined; sent to everyone except the joiner
    Joined { message: String, timestamp: String },
    /// Someone left; sent to the remaining connections
    Left { message: String, timestamp: String },
    /// Full roster in join order; sent to everyone after membership changes
    RosterUpdate { users: Vec<String> },
    UserTyping { display_name: String },
    UserStoppedTyping,
    /// A chat message, echoed to the sender too so its UI renders the
    /// authoritative copy with the server-assigned timestamp
    ChatMessage {
        sender: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileReferenceDto>,
        kind: MessageKindDto,
        timestamp: String,
    },
    /// Sent only to the originating connection when an event is refused
    Rejected { reason: String },
}

impl ServerEvent {
    /// Serialize for the wire.
    ///
    /// Encoding these enums cannot realistically fail; if it ever does, the
    /// fault is logged and downgraded to a generic rejection so a single bad
    /// event can never tear down a connection.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to encode outbound event: {}", e);
            r#"{"type":"rejected","reason":"internal server error"}"#.to_string()
        })
    }
}

/// Wire shape of [`crate::domain::MessageKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKindDto {
    Text,
    File,
}

/// File metadata attached to a message.
///
/// All fields are optional on the wire; the required-field check happens in
/// the use-case layer, not at parse time, so a lacking attachment yields a
/// proper rejection instead of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReferenceDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_event() {
        // given:
        let json = r#"{"type":"join","display_name":"Alice"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::Join {
                display_name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_parse_text_message_event() {
        // given:
        let json = r#"{"type":"message","text":"hello"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::Message {
                text: Some("hello".to_string()),
                file: None
            }
        );
    }

    #[test]
    fn test_parse_file_message_with_partial_metadata() {
        // given: a file reference missing everything but the name
        let json = r#"{"type":"message","file":{"name":"pic.png"}}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then: parsing succeeds, the required-field check comes later
        match event {
            ClientEvent::Message { text, file } => {
                assert_eq!(text, None);
                let file = file.unwrap();
                assert_eq!(file.name.as_deref(), Some("pic.png"));
                assert_eq!(file.locator, None);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_typing_events() {
        // given / when / then:
        assert_eq!(
            serde_json::from_str::<ClientEvent>(r#"{"type":"typing"}"#).unwrap(),
            ClientEvent::Typing
        );
        assert_eq!(
            serde_json::from_str::<ClientEvent>(r#"{"type":"stop_typing"}"#).unwrap(),
            ClientEvent::StopTyping
        );
    }

    #[test]
    fn test_unknown_event_type_fails_to_parse() {
        // given:
        let json = r#"{"type":"shutdown_server"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn test_roster_update_wire_shape() {
        // given:
        let event = ServerEvent::RosterUpdate {
            users: vec!["Alice".to_string(), "Bob".to_string()],
        };

        // when:
        let json = event.to_json();

        // then:
        assert_eq!(
            json,
            r#"{"type":"roster_update","users":["Alice","Bob"]}"#
        );
    }

    #[test]
    fn test_chat_message_omits_absent_fields() {
        // given:
        let event = ServerEvent::ChatMessage {
            sender: "Alice".to_string(),
            text: Some("hi".to_string()),
            file: None,
            kind: MessageKindDto::Text,
            timestamp: "12:00:00".to_string(),
        };

        // when:
        let json = event.to_json();

        // then:
        assert!(json.contains(r#""kind":"text""#));
        assert!(!json.contains("file"));
    }

    #[test]
    fn test_rejected_wire_shape() {
        // given:
        let event = ServerEvent::Rejected {
            reason: "the name 'Alice' is already taken".to_string(),
        };

        // when:
        let json = event.to_json();

        // then:
        assert_eq!(
            json,
            r#"{"type":"rejected","reason":"the name 'Alice' is already taken"}"#
        );
    }
}
