//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::value_object::{Age, GroupName, MessageContent, Timestamp, UserName};

/// Default group description when none is supplied.
pub const DEFAULT_GROUP_ABOUT: &str = "No description";

/// Represents a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User name (unique key)
    pub name: UserName,
    /// Declared age
    pub age: Age,
    /// Timestamp of the last registration or disconnect
    pub last_active: Timestamp,
}

impl User {
    /// Create a new user record
    pub fn new(name: UserName, age: Age, last_active: Timestamp) -> Self {
        Self {
            name,
            age,
            last_active,
        }
    }
}

/// Represents a named chat group with a membership set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name (unique key)
    pub name: GroupName,
    /// Free-form description
    pub about: String,
    /// Name of the user who created the group
    pub creator: UserName,
    /// Current members. Set semantics: no duplicates, no ordering meaning.
    pub members: BTreeSet<UserName>,
    /// Timestamp when the group was created
    pub created_at: Timestamp,
}

impl Group {
    /// Create a new group. The description defaults to
    /// [`DEFAULT_GROUP_ABOUT`] and the creator becomes the first member.
    pub fn new(
        name: GroupName,
        about: Option<String>,
        creator: UserName,
        created_at: Timestamp,
    ) -> Self {
        let about = about
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_GROUP_ABOUT.to_string());
        let mut members = BTreeSet::new();
        members.insert(creator.clone());
        Self {
            name,
            about,
            creator,
            members,
            created_at,
        }
    }

    /// Add a member. Returns `true` if the member was not already present.
    pub fn insert_member(&mut self, member: UserName) -> bool {
        self.members.insert(member)
    }

    /// Remove a member. Returns `true` if the member was present.
    pub fn remove_member(&mut self, member: &UserName) -> bool {
        self.members.remove(member)
    }

    /// Check membership
    pub fn contains_member(&self, member: &UserName) -> bool {
        self.members.contains(member)
    }
}

/// Represents a persisted chat message.
///
/// Messages are append-only and immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Message body (text, or a data URL when `is_image` is set)
    pub content: MessageContent,
    /// Sender's user name
    pub sender: UserName,
    /// Group name the message was posted to
    pub room: GroupName,
    /// Whether the content is an image payload
    pub is_image: bool,
    /// Timestamp when the message was posted
    pub timestamp: Timestamp,
}

impl StoredMessage {
    /// Create a new message
    pub fn new(
        content: MessageContent,
        sender: UserName,
        room: GroupName,
        is_image: bool,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            content,
            sender,
            room,
            is_image,
            timestamp,
        }
    }
}
