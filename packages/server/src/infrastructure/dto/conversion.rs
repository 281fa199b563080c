//! Conversion logic between DTOs and domain types.

use banter_shared::time::format_clock_time;

use crate::domain::{FileReference, MessageKind, OutboundMessage};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::FileReferenceDto> for FileReference {
    fn from(dto: dto::FileReferenceDto) -> Self {
        // absent wire fields become empty values; the required-field check
        // in the use-case layer rejects them there
        Self {
            name: dto.name.unwrap_or_default(),
            mime_type: dto.mime_type.unwrap_or_default(),
            size_bytes: dto.size_bytes.unwrap_or(0),
            locator: dto.locator.unwrap_or_default(),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<FileReference> for dto::FileReferenceDto {
    fn from(file: FileReference) -> Self {
        Self {
            name: Some(file.name),
            mime_type: Some(file.mime_type),
            size_bytes: Some(file.size_bytes),
            locator: Some(file.locator),
        }
    }
}

impl From<MessageKind> for dto::MessageKindDto {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Text => Self::Text,
            MessageKind::File => Self::File,
        }
    }
}

impl From<OutboundMessage> for dto::ServerEvent {
    fn from(msg: OutboundMessage) -> Self {
        Self::ChatMessage {
            sender: msg.sender,
            text: msg.text.map(|t| t.into_string()),
            file: msg.file.map(Into::into),
            kind: msg.kind.into(),
            timestamp: format_clock_time(msg.sent_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageText;

    #[test]
    fn test_partial_file_dto_to_domain() {
        // given:
        let dto_file = dto::FileReferenceDto {
            name: Some("pic.png".to_string()),
            mime_type: None,
            size_bytes: None,
            locator: None,
        };

        // when:
        let file: FileReference = dto_file.into();

        // then:
        assert_eq!(file.name, "pic.png");
        assert_eq!(file.locator, "");
        assert_eq!(file.size_bytes, 0);
    }

    #[test]
    fn test_domain_file_to_dto() {
        // given:
        let file = FileReference {
            name: "doc.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 2048,
            locator: "/files/doc123".to_string(),
        };

        // when:
        let dto_file: dto::FileReferenceDto = file.into();

        // then:
        assert_eq!(dto_file.name.as_deref(), Some("doc.pdf"));
        assert_eq!(dto_file.locator.as_deref(), Some("/files/doc123"));
        assert_eq!(dto_file.size_bytes, Some(2048));
    }

    #[test]
    fn test_outbound_message_to_chat_event() {
        // given: 2023-01-01 12:34:56 UTC
        let msg = OutboundMessage::new(
            "Alice".to_string(),
            Some(MessageText::new("hello").unwrap()),
            None,
            1_672_576_496_000,
        );

        // when:
        let event: dto::ServerEvent = msg.into();

        // then:
        match event {
            dto::ServerEvent::ChatMessage {
                sender,
                text,
                file,
                kind,
                timestamp,
            } => {
                assert_eq!(sender, "Alice");
                assert_eq!(text.as_deref(), Some("hello"));
                assert_eq!(file, None);
                assert_eq!(kind, dto::MessageKindDto::Text);
                assert_eq!(timestamp, "12:34:56");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_file_message_to_chat_event_kind() {
        // given:
        let file = FileReference {
            name: "pic.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 1,
            locator: "/files/pic".to_string(),
        };
        let msg = OutboundMessage::new("Bob".to_string(), None, Some(file), 0);

        // when:
        let event: dto::ServerEvent = msg.into();

        // then:
        match event {
            dto::ServerEvent::ChatMessage { kind, file, .. } => {
                assert_eq!(kind, dto::MessageKindDto::File);
                assert!(file.is_some());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
