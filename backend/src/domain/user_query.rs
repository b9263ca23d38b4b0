//! Translation of loosely typed request parameters into a user predicate.
//!
//! Inbound adapters hand over the raw query bag ([`QueryParams`]); this module
//! validates it once into a [`UserQuery`] with one optional field per
//! recognised parameter. The query yields a [`UserPredicate`] (a conjunction
//! of [`Criterion`] values) and the sort directives used by flat listing and
//! company grouping.
//!
//! Unrecognised parameter names are ignored. When a name repeats, its first
//! value wins.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use thiserror::Error;

use super::{Age, Role, User};

/// Query parameter selecting an exact age.
pub const AGE_KEY: &str = "age";
/// Query parameter selecting a company substring.
pub const COMPANY_KEY: &str = "company";
/// Query parameter selecting a role.
pub const ROLE_KEY: &str = "role";
/// Query parameter selecting a name substring.
pub const NAME_KEY: &str = "name";
/// Query parameter choosing the sort key.
pub const SORT_BY_KEY: &str = "sortBy";
/// Query parameter choosing the sort direction.
pub const SORT_ORDER_KEY: &str = "sortOrder";

/// Raw request parameters; a name may carry several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Empty parameter bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First value supplied for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in iter {
            values.entry(name.into()).or_default().push(value.into());
        }
        Self { values }
    }
}

/// A supplied parameter could not be parsed or lies outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} parameter '{value}': {reason}")]
pub struct InvalidParameter {
    field: &'static str,
    value: String,
    reason: String,
}

impl InvalidParameter {
    /// Reject `value` supplied for `field`.
    pub fn new(field: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Name of the offending parameter.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Raw value as received.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Why the value was rejected.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }
}

/// Single field test over a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// `age == value`.
    AgeEquals(Age),
    /// `company` contains the fragment, ignoring case.
    CompanyContains(String),
    /// `role == value`.
    RoleEquals(Role),
    /// `name` contains the fragment, ignoring case.
    NameContains(String),
}

impl Criterion {
    /// Whether `user` satisfies this criterion.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::AgeEquals(age) => user.age() == *age,
            Self::CompanyContains(fragment) => contains_ignoring_case(user.company(), fragment),
            Self::RoleEquals(role) => user.role() == *role,
            Self::NameContains(fragment) => contains_ignoring_case(user.name(), fragment),
        }
    }
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conjunction of criteria. An empty predicate matches every user.
///
/// # Examples
/// ```
/// use user_directory::domain::{Criterion, Role, UserPredicate};
///
/// let predicate = UserPredicate::all()
///     .and(Criterion::CompanyContains("ohm".to_owned()))
///     .and(Criterion::RoleEquals(Role::Viewer));
/// assert_eq!(predicate.criteria().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPredicate {
    criteria: Vec<Criterion>,
}

impl UserPredicate {
    /// Predicate imposing no constraint.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a criterion every match must also satisfy.
    #[must_use]
    pub fn and(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Criteria in the order they were added.
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        self.criteria.as_slice()
    }

    /// Whether `user` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(user))
    }
}

/// Key for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Company name, lexicographic.
    Company,
    /// Group size; only meaningful for company grouping.
    Count,
    /// User name, lexicographic.
    Name,
    /// User age, numeric.
    Age,
}

impl SortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "company" => Some(Self::Company),
            "count" => Some(Self::Count),
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            _ => None,
        }
    }
}

/// Sort direction, ascending unless `desc` is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Orient an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A (key, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortDirective {
    /// Sort a flat user list in place. Ties fall back to ascending name.
    ///
    /// [`SortKey::Count`] has no meaning for single users and leaves the
    /// order untouched.
    pub fn sort_users(self, users: &mut [User]) {
        let primary: fn(&User, &User) -> Ordering = match self.key {
            SortKey::Company => |a, b| a.company().cmp(b.company()),
            SortKey::Name => |a, b| a.name().cmp(b.name()),
            SortKey::Age => |a, b| a.age().cmp(&b.age()),
            SortKey::Count => return,
        };
        users.sort_by(|a, b| {
            self.order
                .apply(primary(a, b))
                .then_with(|| a.name().cmp(b.name()))
        });
    }
}

/// Validated listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub age: Option<Age>,
    pub company: Option<String>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
}

impl UserQuery {
    /// Validate the recognised parameters in `params`.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::{QueryParams, UserQuery};
    ///
    /// let params: QueryParams = [("age", "37"), ("company", "ohm")].into_iter().collect();
    /// let query = UserQuery::from_params(&params).expect("valid parameters");
    /// assert_eq!(query.predicate().criteria().len(), 2);
    ///
    /// let params: QueryParams = [("age", "151")].into_iter().collect();
    /// let err = UserQuery::from_params(&params).expect_err("out of range");
    /// assert!(err.to_string().contains("151"));
    /// ```
    pub fn from_params(params: &QueryParams) -> Result<Self, InvalidParameter> {
        let age = params
            .first(AGE_KEY)
            .map(|raw| Age::parse(raw).map_err(|err| InvalidParameter::new(AGE_KEY, raw, err)))
            .transpose()?;
        let role = params
            .first(ROLE_KEY)
            .map(|raw| {
                raw.parse::<Role>()
                    .map_err(|err| InvalidParameter::new(ROLE_KEY, raw, err))
            })
            .transpose()?;

        Ok(Self {
            age,
            company: params.first(COMPANY_KEY).map(str::to_owned),
            role,
            name: params.first(NAME_KEY).map(str::to_owned),
            sort_by: params.first(SORT_BY_KEY).and_then(SortKey::parse),
            sort_order: SortOrder::parse(params.first(SORT_ORDER_KEY)),
        })
    }

    /// Conjunction of every supplied filter.
    #[must_use]
    pub fn predicate(&self) -> UserPredicate {
        let mut predicate = UserPredicate::all();
        if let Some(age) = self.age {
            predicate = predicate.and(Criterion::AgeEquals(age));
        }
        if let Some(company) = &self.company {
            predicate = predicate.and(Criterion::CompanyContains(company.clone()));
        }
        if let Some(role) = self.role {
            predicate = predicate.and(Criterion::RoleEquals(role));
        }
        if let Some(name) = &self.name {
            predicate = predicate.and(Criterion::NameContains(name.clone()));
        }
        predicate
    }

    /// Sort directive requested for the result, if any.
    #[must_use]
    pub fn sort(&self) -> Option<SortDirective> {
        self.sort_by.map(|key| SortDirective {
            key,
            order: self.sort_order,
        })
    }
}

/// Build the filter predicate and sort directive for `params`.
pub fn build_filter(
    params: &QueryParams,
) -> Result<(UserPredicate, Option<SortDirective>), InvalidParameter> {
    let query = UserQuery::from_params(params)?;
    Ok((query.predicate(), query.sort()))
}

#[cfg(test)]
mod tests;
