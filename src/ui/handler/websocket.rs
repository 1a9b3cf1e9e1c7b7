//! WebSocket connection handlers.
//!
//! One task per connection: events are read and dispatched sequentially,
//! which preserves per-connection ordering end-to-end. Cleanup runs through
//! the registry exactly once, whether the client closed, the transport
//! failed, or the loop ended.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};

use crate::auth::{AuthError, VerifiedIdentity};
use crate::common::time::now_secs;
use crate::infrastructure::dto::websocket::ErrorMessage;
use crate::session::{ConnectionId, router};
use crate::ui::state::{AppState, ConnectQuery};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // The token is checked before any session exists. A failed verification
    // never reaches the router: the socket is closed with a policy
    // violation right after the upgrade.
    let identity = match query.token {
        Some(token) => match state.auth.verify(&token, now_secs()) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(error = %e, "rejecting connection with invalid token");
                return ws.on_upgrade(move |socket| reject_socket(socket, e));
            }
        },
        // Legacy clients carry no token and authenticate with an in-band
        // register event.
        None => None,
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, identity))
}

/// Close the freshly upgraded socket with a policy-violation code and a
/// reason string, distinct from normal closure.
async fn reject_socket(mut socket: WebSocket, error: AuthError) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: format!("authentication failed: {error}").into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}

async fn handle_socket(
    mut socket: WebSocket,
    state: Arc<AppState>,
    identity: Option<VerifiedIdentity>,
) {
    let connection_id = ConnectionId::new();
    let session = state.registry.register(connection_id).await;
    tracing::info!(%connection_id, "connection registered");

    // Token-authenticated connections enter Authenticated immediately; the
    // identity upsert is the same transition the register event triggers.
    if let Some(identity) = identity {
        let verified = session.lock().await.verify(identity).await;
        if let Err(e) = verified {
            tracing::error!(%connection_id, error = %e, "identity upsert failed at handshake");
            let frame = CloseFrame {
                code: close_code::POLICY,
                reason: "registration failed".into(),
            };
            let _ = socket.send(Message::Close(Some(frame))).await;
            state.registry.deregister(connection_id).await;
            return;
        }
    }

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(%connection_id, error = %e, "WebSocket error");
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                // Events of this connection are dispatched one at a time,
                // in arrival order. A rejected event is reported and the
                // connection stays open.
                if let Err(e) = router::dispatch(&session, &text).await {
                    tracing::warn!(%connection_id, error = %e, "event rejected");
                    let reply = ErrorMessage::new(e.client_message());
                    let reply_json = serde_json::to_string(&reply).unwrap();
                    if socket.send(Message::Text(reply_json.into())).await.is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => {
                tracing::info!(%connection_id, "client requested close");
                break;
            }
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                tracing::debug!(%connection_id, "received ping");
            }
            _ => {}
        }
    }

    // Runs the disconnect transition exactly once; redundant transport
    // close events make this a no-op on the second call.
    state.registry.deregister(connection_id).await;
    tracing::info!(%connection_id, "connection closed and deregistered");
}
