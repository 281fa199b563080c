//! Domain layer: value objects, entities, validation rules and the traits
//! the use-case layer depends on. Concrete implementations live in the
//! infrastructure layer.

mod entity;
mod error;
mod pusher;
mod rate_limit;
mod registry;
pub mod validation;
mod value_object;

pub use entity::{Identity, MessageKind, OutboundMessage};
pub use error::{MessagePushError, MessageTextError, RegistryError};
pub use pusher::{MessagePusher, PusherChannel};
pub use rate_limit::{RATE_WINDOW_CAP, RATE_WINDOW_MILLIS, RateLimiter};
pub use registry::UserRegistry;
pub use value_object::{ConnectionId, DisplayName, FileReference, MessageText};

#[cfg(test)]
pub use pusher::MockMessagePusher;
