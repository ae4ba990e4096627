//! Error taxonomy shared by the evaluator, the store, and their callers.

use thiserror::Error;

use crate::user::ValidationError;

/// Outcomes of directory operations that did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Another user already holds the email
    #[error("user already exists")]
    DuplicateEmail,

    /// No user with the given ID
    #[error("user not found")]
    NotFound,

    /// Requester role is unknown, or lacks domination over the target
    #[error("forbidden")]
    Forbidden,

    /// Requester may not assign one of the requested roles
    #[error("insufficient permissions to assign role")]
    InsufficientPermissions,

    /// Request payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result alias for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;
