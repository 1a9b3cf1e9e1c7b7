//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserName validation error
    #[error("UserName cannot be empty")]
    UserNameEmpty,

    /// UserName too long error
    #[error("UserName cannot exceed {max} characters (got {actual})")]
    UserNameTooLong { max: usize, actual: usize },

    /// GroupName length error (after trimming)
    #[error("GroupName must be between {min} and {max} characters (got {actual})")]
    GroupNameLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// Age below the registration minimum
    #[error("Age must be at least {min} (got {actual})")]
    AgeBelowMinimum { min: u32, actual: u32 },
}

/// Errors returned by the store collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Group creation with a name that already exists
    #[error("Group name already exists")]
    DuplicateGroup(String),

    /// Lookup of a group that does not exist
    #[error("Group not found")]
    GroupNotFound(String),

    /// Lookup of a user that does not exist
    #[error("User not found")]
    UserNotFound(String),

    /// Persistence I/O failure
    #[error("storage backend failure: {0}")]
    Backend(String),
}
