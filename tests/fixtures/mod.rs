//! Shared fixtures for integration tests.

// 各テストバイナリはフィクスチャの一部しか使わない
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use idobata::auth::{AuthGate, VerifiedIdentity};
use idobata::common::time::now_secs;
use idobata::domain::{Age, UserName};
use idobata::infrastructure::repository::{
    InMemoryGroupStore, InMemoryIdentityStore, InMemoryMessageStore,
};
use idobata::session::Stores;
use idobata::ui::{build_router, state::AppState};

/// Secret shared between the test server and minted tokens
pub const TEST_SECRET: &str = "integration-test-secret";

/// An idobata server bound to a fixed local port, with direct access to
/// its in-memory stores for assertions.
pub struct TestServer {
    port: u16,
    pub identity_store: Arc<InMemoryIdentityStore>,
    pub group_store: Arc<InMemoryGroupStore>,
    pub message_store: Arc<InMemoryMessageStore>,
    auth: AuthGate,
}

impl TestServer {
    /// Bind and start serving on 127.0.0.1:`port`.
    pub async fn start(port: u16) -> Self {
        let identity_store = Arc::new(InMemoryIdentityStore::new());
        let group_store = Arc::new(InMemoryGroupStore::new());
        let message_store = Arc::new(InMemoryMessageStore::new());
        let stores = Stores {
            identity: identity_store.clone(),
            groups: group_store.clone(),
            messages: message_store.clone(),
        };
        let auth = AuthGate::new(TEST_SECRET);
        let state = Arc::new(AppState::new(stores, auth.clone()));
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("failed to bind test port");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        Self {
            port,
            identity_store,
            group_store,
            message_store,
            auth,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// WebSocket URL, optionally carrying a bearer token query parameter
    pub fn ws_url(&self, token: Option<&str>) -> String {
        match token {
            Some(token) => format!("ws://127.0.0.1:{}/ws?token={}", self.port, token),
            None => format!("ws://127.0.0.1:{}/ws", self.port),
        }
    }

    /// Mint a token valid for one hour
    pub fn token_for(&self, name: &str, age: u32) -> String {
        let identity = VerifiedIdentity {
            name: UserName::new(name.to_string()).unwrap(),
            age: Age::new(age).unwrap(),
        };
        self.auth.issue(&identity, 3600, now_secs())
    }

    /// Mint a token that expired in the past
    pub fn expired_token_for(&self, name: &str, age: u32) -> String {
        let identity = VerifiedIdentity {
            name: UserName::new(name.to_string()).unwrap(),
            age: Age::new(age).unwrap(),
        };
        self.auth.issue(&identity, -60, now_secs())
    }
}

/// Poll `check` until it returns true or the timeout elapses.
///
/// Server-side cleanup after a client close is asynchronous; assertions on
/// its effects need to wait for the connection task to finish.
pub async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}
