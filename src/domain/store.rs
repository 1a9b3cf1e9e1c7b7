//! Store traits (データアクセス層の抽象化)
//!
//! The session core never reads-then-writes shared documents itself; every
//! mutation goes through these traits, whose implementations must provide
//! atomic single-document upsert, set-add and set-remove operations.
//!
//! 依存性の逆転: ドメイン層が trait を定義し、infrastructure 層が実装します。

use async_trait::async_trait;

use super::entity::{Group, StoredMessage, User};
use super::error::StoreError;
use super::value_object::{Age, GroupName, Timestamp, UserName};

/// Durable record of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create-or-update the user record keyed by name: sets `age` and
    /// `last_active`, never creates a duplicate.
    async fn upsert_user(
        &self,
        name: UserName,
        age: Age,
        now: Timestamp,
    ) -> Result<User, StoreError>;

    /// Update `last_active` for an existing user.
    async fn touch_last_active(
        &self,
        name: &UserName,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Look up a user by name.
    async fn find_user(&self, name: &UserName) -> Result<Option<User>, StoreError>;
}

/// Durable record of groups and their membership sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Create a group. Fails with [`StoreError::DuplicateGroup`] when the
    /// name is taken.
    async fn create_group(&self, group: Group) -> Result<Group, StoreError>;

    /// Look up a group by name.
    async fn find_group(&self, name: &GroupName) -> Result<Option<Group>, StoreError>;

    /// Atomic set-add of a member. Adding an existing member, or adding to
    /// an unknown group, is a no-op.
    async fn add_member(
        &self,
        group: &GroupName,
        member: &UserName,
    ) -> Result<(), StoreError>;

    /// Atomic set-remove of a member. Removing an absent member, or
    /// removing from an unknown group, is a no-op.
    async fn remove_member(
        &self,
        group: &GroupName,
        member: &UserName,
    ) -> Result<(), StoreError>;
}

/// Durable append-only record of messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one message. Stored messages are never mutated.
    async fn append(&self, message: StoredMessage) -> Result<(), StoreError>;

    /// List messages posted to a room, in append order.
    async fn list_by_room(&self, room: &GroupName) -> Result<Vec<StoredMessage>, StoreError>;
}
