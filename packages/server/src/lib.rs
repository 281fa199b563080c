//! Real-time chat room broadcast server.
//!
//! Accepts persistent WebSocket connections, registers a unique display
//! identity per connection, validates and sanitizes inbound events, enforces
//! per-connection rate limits, and fans messages out to all other active
//! connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
