//! Shared utilities for the banter chat server.
//!
//! Holds the concerns that every binary needs regardless of layer:
//! logging setup and time handling.

pub mod logger;
pub mod time;
