//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPredicate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Access to the `users` collection.
///
/// Implementations return records in store-natural order and assign
/// identifiers on insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user satisfying `predicate`.
    async fn find_matching(
        &self,
        predicate: &UserPredicate,
    ) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user and return its assigned identifier.
    async fn insert(&self, user: NewUser) -> Result<UserId, UserPersistenceError>;

    /// Remove a user, reporting whether a record existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
