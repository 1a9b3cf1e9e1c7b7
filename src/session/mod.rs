//! Session 層
//!
//! 接続ごとのセッション状態機械とその周辺を実装するレイヤー。
//! UI 層（WebSocket ハンドラ）から呼び出され、Domain 層の store を操作します。
//!
//! - [`Session`] — 接続ごとの状態機械（Unauthenticated → Authenticated →
//!   InGroup、終端は Closed）
//! - [`SessionRegistry`] — 接続 → セッションのプロセス全体のテーブル
//! - [`router`] — 受信イベントのデコードとディスパッチ

pub mod registry;
pub mod router;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::VerifiedIdentity;
use crate::common::time::now_millis;
use crate::domain::{
    GroupName, GroupStore, IdentityStore, MessageContent, MessageStore, StoreError,
    StoredMessage, Timestamp, User,
};

pub use registry::SessionRegistry;

/// Identifier of one live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store handles shared by every session (データアクセス層の抽象化)
#[derive(Clone)]
pub struct Stores {
    pub identity: Arc<dyn IdentityStore>,
    pub groups: Arc<dyn GroupStore>,
    pub messages: Arc<dyn MessageStore>,
}

/// Errors raised by session transitions.
///
/// All of them are recoverable at the event level: they are reported to the
/// client and the connection stays open. A store failure leaves the
/// session's in-memory state unchanged, so retrying the same event is safe.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Posting or joining without a verified identity
    #[error("You must register before doing that")]
    Unauthorized,

    /// A second registration on an already-authenticated connection
    #[error("Already registered on this connection")]
    AlreadyAuthenticated,

    /// Message posted with no explicit room and no joined group
    #[error("No room specified and no group joined")]
    NoRoom,

    /// Transition attempted after disconnect
    #[error("Session is closed")]
    Closed,

    /// Persistence failure; in-memory state is unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Per-connection state machine.
///
/// Tracks the verified identity and the currently-joined group for one live
/// connection. The identity is set at most once; the joined group changes
/// on every successful join. State fields are only mutated *after* the
/// triggered store call succeeds, so a failed transition is retryable.
pub struct Session {
    connection_id: ConnectionId,
    identity: Option<VerifiedIdentity>,
    joined_group: Option<GroupName>,
    closed: bool,
    stores: Stores,
}

impl Session {
    /// Create a session in the `Unauthenticated` state.
    ///
    /// Only [`SessionRegistry::register`] should call this.
    pub(crate) fn new(connection_id: ConnectionId, stores: Stores) -> Self {
        Self {
            connection_id,
            identity: None,
            joined_group: None,
            closed: false,
            stores,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        self.identity.as_ref()
    }

    pub fn joined_group(&self) -> Option<&GroupName> {
        self.joined_group.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// `Unauthenticated → Authenticated`: record the verified identity and
    /// upsert the user record (current age, last_active = now).
    ///
    /// This is the only path into `Authenticated`, shared by the token
    /// handshake and the legacy `register` event.
    pub async fn verify(&mut self, identity: VerifiedIdentity) -> Result<User, SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        if self.identity.is_some() {
            return Err(SessionError::AlreadyAuthenticated);
        }

        let user = self
            .stores
            .identity
            .upsert_user(
                identity.name.clone(),
                identity.age,
                Timestamp::new(now_millis()),
            )
            .await?;

        // identity is recorded only once the upsert succeeded
        self.identity = Some(identity);
        Ok(user)
    }

    /// `Authenticated → InGroup` (or `InGroup → InGroup`): add the verified
    /// identity to the group's member set and record the joined group.
    ///
    /// Joining the same group twice is a membership no-op. Joining a
    /// *different* group does not remove the previous membership; only
    /// disconnect cleanup removes the current one.
    pub async fn join(&mut self, group: GroupName) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        let identity = self.identity.as_ref().ok_or(SessionError::Unauthorized)?;

        self.stores
            .groups
            .add_member(&group, &identity.name)
            .await?;

        self.joined_group = Some(group);
        Ok(())
    }

    /// Append a message. Requires a verified identity; allowed whether or
    /// not a group has been joined, as long as a room can be resolved.
    ///
    /// Room resolution: an explicit `room` wins, otherwise the currently
    /// joined group is used.
    pub async fn post_message(
        &self,
        content: MessageContent,
        is_image: bool,
        room: Option<GroupName>,
    ) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        let identity = self.identity.as_ref().ok_or(SessionError::Unauthorized)?;
        let room = room
            .or_else(|| self.joined_group.clone())
            .ok_or(SessionError::NoRoom)?;

        let message = StoredMessage::new(
            content,
            identity.name.clone(),
            room,
            is_image,
            Timestamp::new(now_millis()),
        );
        self.stores.messages.append(message).await?;
        Ok(())
    }

    /// `any → Closed`: best-effort, order-independent cleanup.
    ///
    /// Touches `last_active` for the verified identity and removes it from
    /// the joined group's member set. Failures are logged and never
    /// propagated; transport teardown must not block on them. Calling this
    /// on an already-closed session is a no-op.
    pub async fn disconnect(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let Some(identity) = self.identity.as_ref() else {
            return;
        };

        if let Err(e) = self
            .stores
            .identity
            .touch_last_active(&identity.name, Timestamp::new(now_millis()))
            .await
        {
            tracing::warn!(
                connection_id = %self.connection_id,
                user = %identity.name,
                error = %e,
                "failed to touch last_active on disconnect"
            );
        }

        if let Some(group) = self.joined_group.as_ref() {
            if let Err(e) = self
                .stores
                .groups
                .remove_member(group, &identity.name)
                .await
            {
                tracing::warn!(
                    connection_id = %self.connection_id,
                    user = %identity.name,
                    group = %group,
                    error = %e,
                    "failed to remove membership on disconnect"
                );
            }
        }
    }
}
