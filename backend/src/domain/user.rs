//! User record and its constrained field types.
//!
//! [`UserId`] is the codec between the opaque 24-hex-digit token clients see
//! and the store's native 12-byte identifier. [`Age`] and [`Role`] carry the
//! domain constraints shared by query parsing and new-user validation.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Raised when a token is not a legal store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a 24 digit hexadecimal identifier")]
pub struct MalformedUserId {
    value: String,
}

impl MalformedUserId {
    /// The rejected token, verbatim.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Store-assigned user identifier.
///
/// Externally a 24 character hexadecimal token; internally a BSON
/// `ObjectId`, so ids minted in process and by MongoDB share one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(ObjectId);

/// Length of the hexadecimal form of a [`UserId`].
pub const USER_ID_HEX_LEN: usize = 24;

impl UserId {
    /// Decode a client-supplied token.
    ///
    /// Accepts exactly 24 hexadecimal characters in either case.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::UserId;
    ///
    /// let id = UserId::decode("5f8d0d55b54764421b7156c1").expect("legal id");
    /// assert_eq!(id.to_string(), "5f8d0d55b54764421b7156c1");
    /// assert!(UserId::decode("bad").is_err());
    /// ```
    pub fn decode(token: &str) -> Result<Self, MalformedUserId> {
        ObjectId::parse_str(token)
            .map(Self)
            .map_err(|_| MalformedUserId {
                value: token.to_owned(),
            })
    }

    /// Wrap raw identifier bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(ObjectId::from_bytes(bytes))
    }

    /// Raw identifier bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0.bytes()
    }

    /// Allocate a new identifier. Used by stores that assign ids in process.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for UserId {
    type Err = MalformedUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = MalformedUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

/// Failures when interpreting raw input as an [`Age`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    /// The input is not an integer.
    #[error("age must be an integer, got {value:?}")]
    NotAnInteger { value: String },
    /// The integer lies outside the allowed range.
    #[error("age must be between {min} and {max} inclusive, got {value}")]
    OutOfRange { value: String, min: u8, max: u8 },
}

/// Age in whole years, constrained to `[Age::MIN, Age::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Youngest accepted age.
    pub const MIN: u8 = 0;
    /// Oldest accepted age.
    pub const MAX: u8 = 150;

    /// Validate an integer age.
    pub fn new(value: i64) -> Result<Self, AgeError> {
        Self::in_range(value).ok_or_else(|| Self::out_of_range(value.to_string()))
    }

    /// Parse and validate a textual age.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Age;
    ///
    /// assert_eq!(Age::parse("150").map(|age| age.years()), Ok(150));
    /// assert!(Age::parse("151").is_err());
    /// assert!(Age::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AgeError> {
        let value = raw
            .parse::<i64>()
            .map_err(|_| AgeError::NotAnInteger {
                value: raw.to_owned(),
            })?;
        Self::in_range(value).ok_or_else(|| Self::out_of_range(raw.to_owned()))
    }

    fn in_range(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|years| *years <= Self::MAX)
            .map(Self)
    }

    fn out_of_range(value: String) -> AgeError {
        AgeError::OutOfRange {
            value,
            min: Self::MIN,
            max: Self::MAX,
        }
    }

    /// Age in years.
    #[must_use]
    pub const fn years(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = AgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when text names no known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("role must be one of admin, editor or viewer, got {value:?}")]
pub struct UnknownRole {
    value: String,
}

/// Fixed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access.
    Admin,
    /// May modify content.
    Editor,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Editor, Self::Viewer];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated user awaiting a store identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: Age,
    pub company: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `avatar` is derived from `email` when the user is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "5f8d0d55b54764421b7156c1")]
    id: UserId,
    #[schema(example = "Jamie")]
    name: String,
    #[schema(value_type = u8, example = 37)]
    age: Age,
    #[schema(example = "OHMNET")]
    company: String,
    #[schema(example = "jamie@frogs.com")]
    email: String,
    role: Role,
    #[schema(example = "https://gravatar.com/avatar/d4a6c71dd9470ad4cf58f78c100258bf?d=identicon")]
    avatar: String,
}

impl User {
    /// Attach a store identifier to a validated new user.
    #[must_use]
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            name,
            age,
            company,
            email,
            role,
            avatar,
        } = new_user;
        Self {
            id,
            name,
            age,
            company,
            email,
            role,
            avatar,
        }
    }

    /// Store identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Company name as stored.
    #[must_use]
    pub fn company(&self) -> &str {
        self.company.as_str()
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Assigned role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Avatar URL derived from the email address.
    #[must_use]
    pub fn avatar(&self) -> &str {
        self.avatar.as_str()
    }
}
