//! Business rules for new users.
//!
//! Every rule runs on every candidate; the result lists all violations in
//! field order (name, age, company, email, role), never just the first.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{Age, NewUser, Role};

/// Message for a missing or blank name.
pub const NAME_REQUIRED: &str = "non-empty user name required";
/// Message for a missing or blank company.
pub const COMPANY_REQUIRED: &str = "non-empty company name required";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, a dotted domain, no whitespace anywhere.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@.]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationViolation {
    /// Field the rule applies to.
    #[schema(example = "age")]
    pub field: String,
    /// Human readable explanation.
    #[schema(example = "age must be between 0 and 150 inclusive, got 151")]
    pub message: String,
    /// Offending input rendered as text; empty when absent.
    #[schema(example = "151")]
    pub rejected_value: String,
}

impl ValidationViolation {
    fn new(field: &str, message: impl Into<String>, rejected_value: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
            rejected_value: rejected_value.into(),
        }
    }
}

/// Unvalidated new-user input as submitted by a client.
///
/// `age` is kept as raw JSON so that a non-numeric age becomes a violation
/// rather than a decoding failure. Client supplied `_id` and `avatar` are
/// never read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct NewUserCandidate {
    #[schema(example = "Jamie")]
    pub name: Option<String>,
    #[schema(value_type = Option<i64>, example = 37)]
    pub age: Option<Value>,
    #[schema(example = "OHMNET")]
    pub company: Option<String>,
    #[schema(example = "jamie@frogs.com")]
    pub email: Option<String>,
    #[schema(example = "viewer")]
    pub role: Option<String>,
}

/// A candidate that passed every rule, awaiting its avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCandidate {
    name: String,
    age: Age,
    company: String,
    email: String,
    role: Role,
}

impl ValidCandidate {
    /// Address the avatar is derived from.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Complete the record with its derived avatar.
    #[must_use]
    pub fn into_new_user(self, avatar: String) -> NewUser {
        NewUser {
            name: self.name,
            age: self.age,
            company: self.company,
            email: self.email,
            role: self.role,
            avatar,
        }
    }
}

impl NewUserCandidate {
    /// Every violation, in field order. Empty when the candidate is valid.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::NewUserCandidate;
    ///
    /// let violations = NewUserCandidate::default().validate();
    /// let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    /// assert_eq!(fields, ["name", "age", "company", "email", "role"]);
    /// ```
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationViolation> {
        self.check().err().unwrap_or_default()
    }

    /// Apply every rule, yielding either the typed fields or all violations.
    pub fn check(&self) -> Result<ValidCandidate, Vec<ValidationViolation>> {
        let name = required_text("name", self.name.as_deref(), NAME_REQUIRED);
        let age = self.check_age();
        let company = required_text("company", self.company.as_deref(), COMPANY_REQUIRED);
        let email = self.check_email();
        let role = self.check_role();

        match (name, age, company, email, role) {
            (Ok(name), Ok(age), Ok(company), Ok(email), Ok(role)) => Ok(ValidCandidate {
                name,
                age,
                company,
                email,
                role,
            }),
            (name, age, company, email, role) => Err([
                name.err(),
                age.err(),
                company.err(),
                email.err(),
                role.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }

    fn check_age(&self) -> Result<Age, ValidationViolation> {
        let parsed = match &self.age {
            Some(Value::Number(number)) => number
                .as_i64()
                .map(Age::new)
                .unwrap_or_else(|| Age::parse(&number.to_string())),
            Some(Value::String(raw)) => Age::parse(raw),
            other => Age::parse(&raw_text(other.as_ref())),
        };
        parsed.map_err(|err| {
            ValidationViolation::new("age", err.to_string(), raw_text(self.age.as_ref()))
        })
    }

    fn check_email(&self) -> Result<String, ValidationViolation> {
        let email = self.email.as_deref().unwrap_or_default();
        if email_regex().is_match(email) {
            Ok(email.to_owned())
        } else {
            Err(ValidationViolation::new(
                "email",
                format!("{email:?} is not a valid email address"),
                email,
            ))
        }
    }

    fn check_role(&self) -> Result<Role, ValidationViolation> {
        let raw = self.role.as_deref().unwrap_or_default();
        raw.parse::<Role>()
            .map_err(|err| ValidationViolation::new("role", err.to_string(), raw))
    }
}

fn required_text(
    field: &str,
    value: Option<&str>,
    message: &str,
) -> Result<String, ValidationViolation> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.to_owned()),
        other => Err(ValidationViolation::new(
            field,
            message,
            other.unwrap_or_default(),
        )),
    }
}

fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
    }
}
