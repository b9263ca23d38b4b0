//! Driving port for write-side user operations.

use async_trait::async_trait;

use crate::domain::{NewUserCandidate, UserDirectoryError, UserId};

/// Creation and removal of users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store `candidate`, returning the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::ValidationFailed`] listing every broken
    /// rule when the candidate is rejected.
    async fn add_user(&self, candidate: NewUserCandidate) -> Result<UserId, UserDirectoryError>;

    /// Remove the user identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when no such user exists,
    /// including one that was already deleted.
    async fn delete_user(&self, token: &str) -> Result<(), UserDirectoryError>;
}
