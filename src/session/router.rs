//! Message Router: 受信イベントのデコードとディスパッチ
//!
//! 生のペイロードを一度だけ型付きコマンドにデコードし、所有セッションの
//! 遷移に振り分けます。未知のイベント種別はデコード時のエラーであり、
//! 実行時のデフォルトケースでは扱いません。
//!
//! 遷移の失敗は [`RouterError`] として呼び出し元（WebSocket ハンドラ）に
//! 返り、単一の `{type:"error"}` ペイロードとしてクライアントに報告され
//! ます。ディスパッチ境界を越えて panic や例外が漏れることはありません。

use thiserror::Error;
use tokio::sync::Mutex;

use crate::auth::VerifiedIdentity;
use crate::domain::{Age, GroupName, MessageContent, UserName};
use crate::infrastructure::dto::websocket::ClientEvent;

use super::{Session, SessionError};

/// Event kinds the router recognizes.
const KNOWN_EVENT_KINDS: [&str; 3] = ["register", "message", "joinGroup"];

/// Errors surfaced to the client for a rejected event.
///
/// None of these closes the connection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouterError {
    /// `type` field names an unrecognized event kind
    #[error("unknown event kind '{0}'")]
    UnknownEventKind(String),

    /// Payload is not JSON, misses a required field, or carries a field
    /// that fails validation
    #[error("malformed event payload")]
    MalformedEvent,

    /// The session transition itself failed
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RouterError {
    /// Human-readable message for the outbound error payload.
    ///
    /// Store failures are deliberately generic: the event is retryable and
    /// the backend detail stays in the server log.
    pub fn client_message(&self) -> String {
        match self {
            RouterError::UnknownEventKind(_) => "Invalid message type".to_string(),
            RouterError::MalformedEvent => "Malformed event payload".to_string(),
            RouterError::Session(SessionError::Store(_)) => {
                "Storage error, please retry".to_string()
            }
            RouterError::Session(e) => e.to_string(),
        }
    }
}

/// Decode one raw payload into a typed command.
///
/// The discriminant is checked first so an unknown kind is reported as
/// such rather than as a generic parse failure.
pub fn decode_event(raw: &str) -> Result<ClientEvent, RouterError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|_| RouterError::MalformedEvent)?;
    let kind = value
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(RouterError::MalformedEvent)?;
    if !KNOWN_EVENT_KINDS.contains(&kind) {
        return Err(RouterError::UnknownEventKind(kind.to_string()));
    }
    serde_json::from_value(value).map_err(|_| RouterError::MalformedEvent)
}

/// Decode `raw` and apply it to the owning session.
///
/// The session lock is held for the whole transition, which keeps events
/// of one connection strictly ordered and serializes them against the
/// session's own disconnect cleanup.
pub async fn dispatch(session: &Mutex<Session>, raw: &str) -> Result<(), RouterError> {
    let event = decode_event(raw)?;
    match event {
        ClientEvent::Register { name, age } => {
            let name = UserName::new(name).map_err(|_| RouterError::MalformedEvent)?;
            let age = Age::new(age).map_err(|_| RouterError::MalformedEvent)?;
            session
                .lock()
                .await
                .verify(VerifiedIdentity { name, age })
                .await?;
            Ok(())
        }
        ClientEvent::Message {
            content,
            is_image,
            room,
        } => {
            let content =
                MessageContent::new(content).map_err(|_| RouterError::MalformedEvent)?;
            let room = room
                .map(GroupName::new)
                .transpose()
                .map_err(|_| RouterError::MalformedEvent)?;
            session
                .lock()
                .await
                .post_message(content, is_image, room)
                .await?;
            Ok(())
        }
        // 旧クライアントの userName は受理するが無視する。
        // メンバーシップには常に検証済み identity を使う。
        ClientEvent::JoinGroup { group_name, .. } => {
            let group =
                GroupName::new(group_name).map_err(|_| RouterError::MalformedEvent)?;
            session.lock().await.join(group).await?;
            Ok(())
        }
    }
}
