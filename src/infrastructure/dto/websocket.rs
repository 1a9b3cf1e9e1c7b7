//! WebSocket message DTOs for the chat application.

use serde::{Deserialize, Serialize};

/// Inbound client event, tagged by the `type` field.
///
/// Decoded once into a typed command; unknown kinds are rejected at decode
/// time (see `session::router::decode_event`), never handled by a default
/// case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Legacy in-band registration (token-less clients)
    #[serde(rename = "register")]
    Register { name: String, age: u32 },

    /// Post a message to a room
    #[serde(rename = "message", rename_all = "camelCase")]
    Message {
        content: String,
        #[serde(default)]
        is_image: bool,
        /// Explicit target room; falls back to the joined group when absent
        #[serde(default)]
        room: Option<String>,
    },

    /// Join a group
    #[serde(rename = "joinGroup", rename_all = "camelCase")]
    JoinGroup {
        group_name: String,
        /// Legacy field; membership always uses the verified identity
        #[serde(default)]
        user_name: Option<String>,
    },
}

/// Outbound message type enum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Error,
}

/// Error payload sent for every rejected event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl ErrorMessage {
    /// Create a new error payload
    pub fn new(message: String) -> Self {
        Self {
            r#type: MessageType::Error,
            message,
        }
    }
}
