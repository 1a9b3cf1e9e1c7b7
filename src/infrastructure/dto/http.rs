//! HTTP API DTOs for the chat application.

use serde::{Deserialize, Serialize};

use crate::domain::{Group, StoredMessage};

/// Request body for POST /create-group
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: Option<String>,
    pub about: Option<String>,
    pub creator: Option<String>,
}

/// Group document for group endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDto {
    pub name: String,
    pub about: String,
    pub creator: String,
    pub members: Vec<String>,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub created_at: i64,
}

impl From<&Group> for GroupDto {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.as_str().to_string(),
            about: group.about.clone(),
            creator: group.creator.as_str().to_string(),
            members: group.members.iter().map(|m| m.as_str().to_string()).collect(),
            created_at: group.created_at.value(),
        }
    }
}

/// Persisted message for the room read-back endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub content: String,
    pub sender: String,
    pub room: String,
    pub is_image: bool,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub timestamp: i64,
}

impl From<&StoredMessage> for MessageDto {
    fn from(message: &StoredMessage) -> Self {
        Self {
            content: message.content.as_str().to_string(),
            sender: message.sender.as_str().to_string(),
            room: message.room.as_str().to_string(),
            is_image: message.is_image,
            timestamp: message.timestamp.value(),
        }
    }
}

/// Error body for failed HTTP requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
