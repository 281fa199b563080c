//! Use-case layer: one type per operation the connection lifecycle drives.
//!
//! Use cases depend only on the domain traits, never on the WebSocket
//! transport or the concrete registry.

mod error;
mod join_room;
mod leave_room;
mod send_message;
mod typing;

pub use error::{SendMessageError, TypingError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
