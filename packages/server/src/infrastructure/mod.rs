//! Infrastructure layer: concrete implementations of the domain traits plus
//! the wire-format DTOs.

pub mod dto;
pub mod message_pusher;
pub mod rate_limit;
pub mod registry;

pub use message_pusher::WebSocketMessagePusher;
pub use rate_limit::FixedWindowRateLimiter;
pub use registry::InMemoryUserRegistry;
