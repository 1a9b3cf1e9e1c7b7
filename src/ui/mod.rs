//! WebSocket chat server implementation.

pub mod handler;
mod runner;
pub mod state;

pub use runner::{build_router, run_server};
