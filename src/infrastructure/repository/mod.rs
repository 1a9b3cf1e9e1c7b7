//! Store implementations.

pub mod inmemory;

pub use inmemory::{InMemoryGroupStore, InMemoryIdentityStore, InMemoryMessageStore};
