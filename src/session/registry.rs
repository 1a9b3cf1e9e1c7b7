//! Session Registry: 接続 → セッションのプロセス全体のテーブル
//!
//! セッションを作成・破棄できる唯一の場所。プロセス起動時に一度だけ
//! 生成され、ハンドルで各接続に渡されます（グローバル変数にはしない）。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{ConnectionId, Session, Stores};

/// Process-wide table of live sessions keyed by connection.
///
/// Structural mutations (insert/remove) are mutually exclusive under the
/// table lock; transitions of individual sessions go through each session's
/// own `Mutex` and never block other connections. That per-session lock is
/// also what serializes an in-flight event with the session's own
/// disconnect cleanup.
pub struct SessionRegistry {
    stores: Stores,
    sessions: Mutex<HashMap<ConnectionId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    /// Create an empty registry over the given stores
    pub fn new(stores: Stores) -> Self {
        Self {
            stores,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new `Unauthenticated` session for an accepted connection.
    ///
    /// Must be called exactly once per accepted connection.
    pub async fn register(&self, connection_id: ConnectionId) -> Arc<Mutex<Session>> {
        let session = Arc::new(Mutex::new(Session::new(connection_id, self.stores.clone())));
        let mut sessions = self.sessions.lock().await;
        if sessions
            .insert(connection_id, session.clone())
            .is_some()
        {
            tracing::warn!(%connection_id, "connection registered twice, replacing session");
        }
        session
    }

    /// Remove the session and run its disconnect cleanup.
    ///
    /// Transport layers can raise close events redundantly, so calling this
    /// twice is a no-op: the cleanup side effects run only once, on the
    /// call that actually removed the entry.
    pub async fn deregister(&self, connection_id: ConnectionId) {
        let removed = {
            let mut sessions = self.sessions.lock().await;
            sessions.remove(&connection_id)
        };
        // the table lock is released before awaiting the session's own
        // lock, so cleanup never blocks other connections
        if let Some(session) = removed {
            session.lock().await.disconnect().await;
        }
    }

    /// Number of live sessions
    pub async fn count_sessions(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
