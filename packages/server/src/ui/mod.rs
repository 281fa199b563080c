//! WebSocket chat server implementation.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{DEFAULT_JOIN_DEADLINE, Server};
