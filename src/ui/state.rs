//! Server state and connection query types.

use serde::Deserialize;

use crate::auth::AuthGate;
use crate::session::{SessionRegistry, Stores};

/// Query parameters for the WebSocket handshake
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Bearer token; legacy clients omit it and register in-band
    pub token: Option<String>,
}

/// Shared application state, built once at process start and passed by
/// handle to every request. The registry is deliberately not a global.
pub struct AppState {
    /// Store handles (データアクセス層の抽象化)
    pub stores: Stores,
    /// Live session table
    pub registry: SessionRegistry,
    /// Token verifier
    pub auth: AuthGate,
}

impl AppState {
    /// Assemble the state over the given stores and auth gate
    pub fn new(stores: Stores, auth: AuthGate) -> Self {
        let registry = SessionRegistry::new(stores.clone());
        Self {
            stores,
            registry,
            auth,
        }
    }
}
