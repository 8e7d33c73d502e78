//! Integration tests for pumpwatch-bot.
//!
//! These tests verify the interaction between components:
//! - stream client lifecycle against a scripted WebSocket server
//! - end-to-end event yield and reconnect behavior
//! - the trade cycle over fake collaborators

pub mod common;
