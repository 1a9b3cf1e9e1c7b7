//! WebSocket group chat server library.
//!
//! This library implements the chat service core: per-connection session
//! state machine, authenticated event dispatch, group membership, and
//! persisted messages, layered DDD style (domain / infrastructure /
//! session / ui).

pub mod auth;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod session;
pub mod ui;

// Re-export entry point
pub use ui::run_server;
