//! Domain primitives, rules and services of the user directory.
//!
//! Purpose: keep the query, validation and aggregation rules free of HTTP
//! and storage concerns. Inbound adapters call the driving ports in
//! [`ports`]; storage adapters implement [`ports::UserRepository`].
//!
//! Public surface:
//! - `User`, `UserId`, `Age`, `Role`: the stored record and its fields.
//! - `UserQuery`, `UserPredicate`: typed listing parameters.
//! - `NewUserCandidate`, `ValidationViolation`: new-user rules.
//! - `GroupSummary`, `aggregate`: grouping by company.
//! - `UserDirectoryService`: implementation of the driving ports.
//! - `Error`, `ErrorCode`: transport-agnostic error envelope.

pub mod aggregation;
pub mod avatar;
pub mod directory_error;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;
pub mod user_query;
pub mod validation;

pub use self::aggregation::{GroupSort, GroupSortKey, GroupSummary, aggregate};
pub use self::avatar::{AVATAR_FALLBACK_URL, AvatarGenerator, Md5Digest};
pub use self::directory_error::UserDirectoryError;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Age, AgeError, MalformedUserId, NewUser, Role, USER_ID_HEX_LEN, UnknownRole, User, UserId,
};
pub use self::user_directory_service::UserDirectoryService;
pub use self::user_query::{
    Criterion, InvalidParameter, QueryParams, SortDirective, SortKey, SortOrder, UserPredicate,
    UserQuery, build_filter,
};
pub use self::validation::{NewUserCandidate, ValidCandidate, ValidationViolation};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use user_directory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
