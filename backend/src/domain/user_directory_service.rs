//! User directory service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports over any
//! [`UserRepository`]. The service holds no mutable state of its own; every
//! call works on its own input and delegates storage to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::avatar::{AvatarGenerator, EmailDigest, Md5Digest};
use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{
    GroupSort, GroupSummary, NewUserCandidate, QueryParams, User, UserDirectoryError, UserId,
    UserQuery, aggregate,
};

/// Read and write use cases over the `users` collection.
#[derive(Clone)]
pub struct UserDirectoryService<R, D = Md5Digest> {
    repo: Arc<R>,
    avatars: Arc<AvatarGenerator<D>>,
}

impl<R> UserDirectoryService<R> {
    /// Create a service deriving avatars from MD5 digests.
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_avatar_generator(repo, AvatarGenerator::default())
    }
}

impl<R, D> UserDirectoryService<R, D> {
    /// Create a service with a specific avatar generator.
    pub fn with_avatar_generator(repo: Arc<R>, avatars: AvatarGenerator<D>) -> Self {
        Self {
            repo,
            avatars: Arc::new(avatars),
        }
    }
}

impl<R, D> UserDirectoryService<R, D>
where
    R: UserRepository,
    D: EmailDigest,
{
    fn persistence_failure(operation: &'static str, err: UserPersistenceError) -> UserDirectoryError {
        error!(operation, error = %err, "user repository failed");
        UserDirectoryError::Persistence(err)
    }

    async fn query(&self, query: &UserQuery) -> Result<Vec<User>, UserDirectoryError> {
        let predicate = query.predicate();
        debug!(criteria = predicate.criteria().len(), "scanning users");
        self.repo
            .find_matching(&predicate)
            .await
            .map_err(|err| Self::persistence_failure("find_matching", err))
    }
}

#[async_trait]
impl<R, D> UsersQuery for UserDirectoryService<R, D>
where
    R: UserRepository,
    D: EmailDigest,
{
    async fn list_users(&self, params: &QueryParams) -> Result<Vec<User>, UserDirectoryError> {
        let query = UserQuery::from_params(params)?;
        let mut users = self.query(&query).await?;
        if let Some(sort) = query.sort() {
            sort.sort_users(&mut users);
        }
        debug!(matched = users.len(), "listed users");
        Ok(users)
    }

    async fn get_user(&self, token: &str) -> Result<User, UserDirectoryError> {
        let id = UserId::decode(token)?;
        self.repo
            .find_by_id(&id)
            .await
            .map_err(|err| Self::persistence_failure("find_by_id", err))?
            .ok_or_else(|| UserDirectoryError::not_found(id))
    }

    async fn grouped_by_company(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<GroupSummary>, UserDirectoryError> {
        let query = UserQuery::from_params(params)?;
        let users = self.query(&query).await?;
        let groups = aggregate(users, GroupSort::from_directive(query.sort()));
        debug!(groups = groups.len(), "grouped users by company");
        Ok(groups)
    }
}

#[async_trait]
impl<R, D> UsersCommand for UserDirectoryService<R, D>
where
    R: UserRepository,
    D: EmailDigest,
{
    async fn add_user(&self, candidate: NewUserCandidate) -> Result<UserId, UserDirectoryError> {
        let valid = candidate.check().map_err(|violations| {
            warn!(violations = violations.len(), "rejected new user");
            UserDirectoryError::validation_failed(violations)
        })?;
        let avatar = self.avatars.generate(valid.email());
        let id = self
            .repo
            .insert(valid.into_new_user(avatar))
            .await
            .map_err(|err| Self::persistence_failure("insert", err))?;
        info!(%id, "created user");
        Ok(id)
    }

    async fn delete_user(&self, token: &str) -> Result<(), UserDirectoryError> {
        let id = UserId::decode(token)?;
        let existed = self
            .repo
            .delete(&id)
            .await
            .map_err(|err| Self::persistence_failure("delete", err))?;
        if !existed {
            return Err(UserDirectoryError::not_found(id));
        }
        info!(%id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
