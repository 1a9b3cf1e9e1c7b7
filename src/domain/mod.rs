//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod store;
pub mod value_object;

pub use entity::{Group, StoredMessage, User};
pub use error::{StoreError, ValueObjectError};
pub use store::{GroupStore, IdentityStore, MessageStore};
pub use value_object::{Age, GroupName, MessageContent, Timestamp, UserName};
