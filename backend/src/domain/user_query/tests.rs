//! Tests for query parameter translation.

use super::*;
use crate::domain::{NewUser, UserId};
use rstest::{fixture, rstest};

fn user(name: &str, age: i64, company: &str, role: Role) -> User {
    User::new(
        UserId::generate(),
        NewUser {
            name: name.to_owned(),
            age: Age::new(age).expect("fixture age"),
            company: company.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            avatar: String::new(),
        },
    )
}

#[fixture]
fn directory() -> Vec<User> {
    vec![
        user("Chris", 25, "UMM", Role::Admin),
        user("Pat", 37, "IBM", Role::Editor),
        user("Jamie", 37, "OHMNET", Role::Viewer),
        user("Sam", 45, "OHMNET", Role::Viewer),
    ]
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().copied().collect()
}

fn matching_names(predicate: &UserPredicate, users: &[User]) -> Vec<String> {
    users
        .iter()
        .filter(|user| predicate.matches(user))
        .map(|user| user.name().to_owned())
        .collect()
}

#[rstest]
fn empty_parameters_match_everyone(directory: Vec<User>) {
    let (predicate, sort) = build_filter(&QueryParams::new()).expect("valid");
    assert!(predicate.criteria().is_empty());
    assert!(sort.is_none());
    assert_eq!(matching_names(&predicate, &directory).len(), 4);
}

#[rstest]
#[case(&[("age", "37")], &["Pat", "Jamie"])]
#[case(&[("company", "ohm")], &["Jamie", "Sam"])]
#[case(&[("company", "OhMnEt")], &["Jamie", "Sam"])]
#[case(&[("role", "viewer")], &["Jamie", "Sam"])]
#[case(&[("name", "AM")], &["Jamie", "Sam"])]
#[case(&[("age", "37"), ("company", "ohm")], &["Jamie"])]
#[case(&[("age", "37"), ("role", "editor")], &["Pat"])]
#[case(&[("company", "nowhere")], &[])]
fn filters_are_conjunctive(
    directory: Vec<User>,
    #[case] pairs: &[(&str, &str)],
    #[case] expected: &[&str],
) {
    let (predicate, _) = build_filter(&params(pairs)).expect("valid");
    assert_eq!(matching_names(&predicate, &directory), expected);
}

#[rstest]
fn unrecognised_parameters_are_ignored() {
    let query = UserQuery::from_params(&params(&[("colour", "blue")])).expect("valid");
    assert_eq!(query, UserQuery::default());
}

#[rstest]
fn first_value_wins_for_repeated_parameters() {
    let bag = params(&[("age", "37"), ("age", "not a number")]);
    assert_eq!(bag.first(AGE_KEY), Some("37"));
    let query = UserQuery::from_params(&bag).expect("first value is valid");
    assert_eq!(query.age.map(Age::years), Some(37));
}

#[rstest]
#[case(AGE_KEY, "abc")]
#[case(AGE_KEY, "-1")]
#[case(AGE_KEY, "151")]
#[case(ROLE_KEY, "owner")]
fn invalid_values_are_reported_verbatim(#[case] field: &'static str, #[case] raw: &str) {
    let err = UserQuery::from_params(&params(&[(field, raw)])).expect_err("invalid");
    assert_eq!(err.field(), field);
    assert_eq!(err.value(), raw);
    assert!(err.to_string().contains(raw));
}

#[rstest]
#[case(&[("sortBy", "count")], Some(SortDirective { key: SortKey::Count, order: SortOrder::Asc }))]
#[case(&[("sortBy", "company"), ("sortOrder", "desc")], Some(SortDirective { key: SortKey::Company, order: SortOrder::Desc }))]
#[case(&[("sortBy", "age"), ("sortOrder", "sideways")], Some(SortDirective { key: SortKey::Age, order: SortOrder::Asc }))]
#[case(&[("sortBy", "shoe size")], None)]
#[case(&[("sortOrder", "desc")], None)]
fn sort_directives(#[case] pairs: &[(&str, &str)], #[case] expected: Option<SortDirective>) {
    let (_, sort) = build_filter(&params(pairs)).expect("valid");
    assert_eq!(sort, expected);
}

#[rstest]
#[case(SortKey::Name, SortOrder::Asc, &["Chris", "Jamie", "Pat", "Sam"])]
#[case(SortKey::Age, SortOrder::Desc, &["Sam", "Jamie", "Pat", "Chris"])]
#[case(SortKey::Company, SortOrder::Asc, &["Pat", "Jamie", "Sam", "Chris"])]
#[case(SortKey::Count, SortOrder::Desc, &["Chris", "Pat", "Jamie", "Sam"])]
fn flat_lists_sort_with_name_tie_break(
    mut directory: Vec<User>,
    #[case] key: SortKey,
    #[case] order: SortOrder,
    #[case] expected: &[&str],
) {
    SortDirective { key, order }.sort_users(&mut directory);
    let names: Vec<&str> = directory.iter().map(User::name).collect();
    assert_eq!(names, expected);
}
