//! Typed failures of the user directory and their envelope mapping.

use serde_json::json;
use thiserror::Error;

use super::ports::UserPersistenceError;
use super::{InvalidParameter, MalformedUserId, UserId, ValidationViolation};

/// Message returned for identifiers that fail to decode.
pub const MALFORMED_ID_MESSAGE: &str = "The requested user id wasn't a legal Mongo Object ID.";
/// Message returned when no user matches an identifier.
pub const NOT_FOUND_MESSAGE: &str = "The requested user was not found";
/// Message returned when a new user breaks one or more rules.
pub const VALIDATION_FAILED_MESSAGE: &str = "new user failed validation";

/// Failures surfaced by the directory's driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// A filter or sort parameter could not be interpreted.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),
    /// A path token is not a legal identifier.
    #[error(transparent)]
    MalformedIdentifier(#[from] MalformedUserId),
    /// No user exists with the identifier.
    #[error("no user with id {id}")]
    NotFound { id: UserId },
    /// A new user broke one or more rules; all violations are listed.
    #[error("new user failed {} validation rule(s)", .violations.len())]
    ValidationFailed { violations: Vec<ValidationViolation> },
    /// The store failed; passed through unmodified.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

impl UserDirectoryError {
    /// Reject a new user with `violations`.
    #[must_use]
    pub fn validation_failed(violations: Vec<ValidationViolation>) -> Self {
        Self::ValidationFailed { violations }
    }

    /// Report `id` as absent.
    #[must_use]
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }
}

impl From<UserDirectoryError> for super::Error {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::InvalidParameter(param) => Self::invalid_request(param.to_string())
                .with_details(json!({
                    "field": param.field(),
                    "value": param.value(),
                    "code": "invalid_parameter",
                })),
            UserDirectoryError::MalformedIdentifier(malformed) => {
                Self::invalid_request(MALFORMED_ID_MESSAGE).with_details(json!({
                    "field": "id",
                    "value": malformed.value(),
                    "code": "malformed_identifier",
                }))
            }
            UserDirectoryError::NotFound { id } => {
                Self::not_found(NOT_FOUND_MESSAGE).with_details(json!({
                    "id": id.to_string(),
                    "code": "not_found",
                }))
            }
            UserDirectoryError::ValidationFailed { violations } => {
                Self::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(json!({
                    "code": "validation_failed",
                    "violations": violations,
                }))
            }
            UserDirectoryError::Persistence(UserPersistenceError::Connection { message }) => {
                Self::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserDirectoryError::Persistence(UserPersistenceError::Query { message }) => {
                Self::internal(format!("user repository error: {message}"))
            }
        }
    }
}
