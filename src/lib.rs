//! WebSocket netplay relay library.
//!
//! This library provides a server that groups WebSocket clients into named
//! rooms and rebroadcasts chat and emulator-state frames to room members.

pub mod server;

// shared library
pub mod common;
