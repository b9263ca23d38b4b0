//! Grouping of users by company.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{SortDirective, SortKey, SortOrder, User};

/// Users sharing one company value.
///
/// ## Invariants
/// - `count == members.len()` and `count >= 1`.
/// - Members are ordered by name ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    key: String,
    members: Vec<User>,
}

impl GroupSummary {
    /// Company name exactly as stored.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Members of the group.
    #[must_use]
    pub fn members(&self) -> &[User] {
        self.members.as_slice()
    }

    /// Consume the summary, yielding its key and members.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<User>) {
        (self.key, self.members)
    }
}

/// Primary ordering of groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupSortKey {
    /// Company name, lexicographic.
    #[default]
    Company,
    /// Group size.
    Count,
}

/// Ordering applied to grouped results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSort {
    pub key: GroupSortKey,
    pub order: SortOrder,
}

impl GroupSort {
    /// Derive group ordering from a listing sort directive.
    ///
    /// Only `count` selects count ordering; any other or absent key groups by
    /// company. The direction is kept either way.
    #[must_use]
    pub fn from_directive(directive: Option<SortDirective>) -> Self {
        directive.map_or_else(Self::default, |directive| Self {
            key: match directive.key {
                SortKey::Count => GroupSortKey::Count,
                SortKey::Company | SortKey::Name | SortKey::Age => GroupSortKey::Company,
            },
            order: directive.order,
        })
    }

    fn compare(self, a: &GroupSummary, b: &GroupSummary) -> Ordering {
        let primary = match self.key {
            GroupSortKey::Company => a.key.cmp(&b.key),
            GroupSortKey::Count => a.count().cmp(&b.count()),
        };
        // Equal counts fall back to company ascending whatever the direction.
        self.order.apply(primary).then_with(|| a.key.cmp(&b.key))
    }
}

/// Partition `users` by exact company value and order the groups.
///
/// # Examples
/// ```
/// use user_directory::domain::{GroupSort, aggregate};
///
/// assert!(aggregate(Vec::new(), GroupSort::default()).is_empty());
/// ```
#[must_use]
pub fn aggregate(users: Vec<User>, sort: GroupSort) -> Vec<GroupSummary> {
    let mut partitions: BTreeMap<String, Vec<User>> = BTreeMap::new();
    for user in users {
        partitions
            .entry(user.company().to_owned())
            .or_default()
            .push(user);
    }

    let mut groups: Vec<GroupSummary> = partitions
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_by(|a, b| a.name().cmp(b.name()));
            GroupSummary { key, members }
        })
        .collect();
    groups.sort_by(|a, b| sort.compare(a, b));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Age, NewUser, Role, UserId};
    use rstest::{fixture, rstest};

    fn user(name: &str, age: i64, company: &str) -> User {
        User::new(
            UserId::generate(),
            NewUser {
                name: name.to_owned(),
                age: Age::new(age).expect("fixture age"),
                company: company.to_owned(),
                email: format!("{}@example.com", name.to_lowercase()),
                role: Role::Viewer,
                avatar: String::new(),
            },
        )
    }

    #[fixture]
    fn directory() -> Vec<User> {
        vec![
            user("Chris", 25, "UMM"),
            user("Sam", 45, "OHMNET"),
            user("Pat", 37, "IBM"),
            user("Jamie", 37, "OHMNET"),
        ]
    }

    fn keys_and_counts(groups: &[GroupSummary]) -> Vec<(&str, usize)> {
        groups.iter().map(|g| (g.key(), g.count())).collect()
    }

    #[rstest]
    #[case(GroupSortKey::Company, SortOrder::Asc, &[("IBM", 1), ("OHMNET", 2), ("UMM", 1)])]
    #[case(GroupSortKey::Company, SortOrder::Desc, &[("UMM", 1), ("OHMNET", 2), ("IBM", 1)])]
    #[case(GroupSortKey::Count, SortOrder::Asc, &[("IBM", 1), ("UMM", 1), ("OHMNET", 2)])]
    #[case(GroupSortKey::Count, SortOrder::Desc, &[("OHMNET", 2), ("IBM", 1), ("UMM", 1)])]
    fn groups_are_ordered(
        directory: Vec<User>,
        #[case] key: GroupSortKey,
        #[case] order: SortOrder,
        #[case] expected: &[(&str, usize)],
    ) {
        let groups = aggregate(directory, GroupSort { key, order });
        assert_eq!(keys_and_counts(&groups), expected);
    }

    #[rstest]
    fn members_are_complete_and_sorted_by_name(directory: Vec<User>) {
        let groups = aggregate(directory, GroupSort::default());
        let ohmnet = groups
            .iter()
            .find(|g| g.key() == "OHMNET")
            .expect("OHMNET group");
        let names: Vec<&str> = ohmnet.members().iter().map(User::name).collect();
        assert_eq!(names, ["Jamie", "Sam"]);
        let total: usize = groups.iter().map(GroupSummary::count).sum();
        assert_eq!(total, 4);
    }

    #[rstest]
    fn grouping_key_is_case_sensitive() {
        let groups = aggregate(
            vec![user("Ann", 30, "Acme"), user("Bob", 31, "ACME")],
            GroupSort::default(),
        );
        assert_eq!(keys_and_counts(&groups), [("ACME", 1), ("Acme", 1)]);
    }

    #[rstest]
    #[case(None, GroupSort::default())]
    #[case(
        Some(SortDirective { key: SortKey::Count, order: SortOrder::Desc }),
        GroupSort { key: GroupSortKey::Count, order: SortOrder::Desc }
    )]
    #[case(
        Some(SortDirective { key: SortKey::Name, order: SortOrder::Desc }),
        GroupSort { key: GroupSortKey::Company, order: SortOrder::Desc }
    )]
    fn group_sort_follows_directive(
        #[case] directive: Option<SortDirective>,
        #[case] expected: GroupSort,
    ) {
        assert_eq!(GroupSort::from_directive(directive), expected);
    }
}
