//! In-process `UserRepository` implementation.
//!
//! Holds the `users` collection in insertion order behind an async lock.
//! Used when no MongoDB URI is configured and by the HTTP tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPredicate};

/// Document collection kept in memory.
///
/// # Examples
/// ```
/// use user_directory::outbound::persistence::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::default();
/// # let _ = repo;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Start from an existing set of users, kept in the given order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_matching(
        &self,
        predicate: &UserPredicate,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|user| predicate.matches(user))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == *id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, UserPersistenceError> {
        let mut users = self.users.write().await;
        let id = loop {
            let candidate = UserId::generate();
            if users.iter().all(|user| user.id() != candidate) {
                break candidate;
            }
        };
        users.push(User::new(id, user));
        debug!(%id, total = users.len(), "inserted user");
        Ok(id)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id() != *id);
        Ok(users.len() != before)
    }
}
