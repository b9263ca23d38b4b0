//! Driving port for read-side user operations.
//!
//! Inbound adapters pass raw request input through this port and receive
//! typed results or a [`UserDirectoryError`] to map onto their transport.

use async_trait::async_trait;

use crate::domain::{GroupSummary, QueryParams, User, UserDirectoryError};

/// Listing, lookup and grouping of users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Users matching every filter in `params`.
    async fn list_users(&self, params: &QueryParams) -> Result<Vec<User>, UserDirectoryError>;

    /// The user identified by the 24 hex digit `token`.
    async fn get_user(&self, token: &str) -> Result<User, UserDirectoryError>;

    /// Users matching `params`, grouped by company and ordered per `sortBy`
    /// and `sortOrder`.
    async fn grouped_by_company(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<GroupSummary>, UserDirectoryError>;
}
