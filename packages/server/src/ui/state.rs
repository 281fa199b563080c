//! Server state shared across connection handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::usecase::{JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase, TypingUseCase};

/// Shared application state
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub typing_usecase: Arc<TypingUseCase>,
    /// How long a fresh connection may stay unvalidated before it is closed
    pub join_deadline: Duration,
}
