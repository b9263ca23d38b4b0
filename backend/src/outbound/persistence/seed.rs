//! Development seed data for the in-memory store.
//!
//! A seed file is a JSON array of user documents. `_id` and `avatar` are
//! optional; missing identifiers are generated and missing avatars are
//! derived from the email address.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{Age, AvatarGenerator, NewUser, Role, User, UserId};

/// Failures while loading seed users.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The content is not a valid array of users.
    #[error("invalid seed data: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct SeedUser {
    #[serde(rename = "_id")]
    id: Option<UserId>,
    name: String,
    age: Age,
    company: String,
    email: String,
    role: Role,
    avatar: Option<String>,
}

impl SeedUser {
    fn into_user(self, avatars: &AvatarGenerator) -> User {
        let avatar = self
            .avatar
            .unwrap_or_else(|| avatars.generate(&self.email));
        User::new(
            self.id.unwrap_or_else(UserId::generate),
            NewUser {
                name: self.name,
                age: self.age,
                company: self.company,
                email: self.email,
                role: self.role,
                avatar,
            },
        )
    }
}

/// Parse seed users from JSON text.
///
/// # Examples
/// ```
/// use user_directory::outbound::persistence::parse_seed;
///
/// let users = parse_seed(r#"[{"name":"Sam","age":45,"company":"OHMNET",
///     "email":"sam@frogs.com","role":"viewer"}]"#).expect("valid seed");
/// assert_eq!(users.len(), 1);
/// ```
pub fn parse_seed(json: &str) -> Result<Vec<User>, SeedError> {
    let seeds: Vec<SeedUser> = serde_json::from_str(json)?;
    let avatars = AvatarGenerator::default();
    Ok(seeds
        .into_iter()
        .map(|seed| seed.into_user(&avatars))
        .collect())
}

/// Read and parse the seed file at `path`.
pub fn load_seed(path: &Path) -> Result<Vec<User>, SeedError> {
    let json = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_owned(),
        source,
    })?;
    let users = parse_seed(&json)?;
    info!(path = %path.display(), count = users.len(), "loaded seed users");
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const SEED: &str = r#"[
        {"_id": "5f8d0d55b54764421b7156c1", "name": "Sam", "age": 45,
         "company": "OHMNET", "email": "sam@frogs.com", "role": "viewer"},
        {"name": "Pat", "age": 37, "company": "IBM", "email": "pat@something.com",
         "role": "editor", "avatar": "https://example.com/pat.png"}
    ]"#;

    #[rstest]
    fn seed_ids_and_avatars_are_kept_or_derived() {
        let users = parse_seed(SEED).expect("valid seed");
        assert_eq!(users[0].id().to_string(), "5f8d0d55b54764421b7156c1");
        assert_eq!(
            users[0].avatar(),
            "https://gravatar.com/avatar/08b7610b558a4cbbd20ae99072801f4d?d=identicon"
        );
        assert_eq!(users[1].avatar(), "https://example.com/pat.png");
    }

    #[rstest]
    #[case(r#"[{"name": "Old", "age": 151, "company": "X", "email": "o@x.io", "role": "viewer"}]"#)]
    #[case(r#"[{"name": "Bad", "age": 1, "company": "X", "email": "b@x.io", "role": "owner"}]"#)]
    #[case(r#"{"not": "an array"}"#)]
    fn seed_rejects_out_of_domain_records(#[case] json: &str) {
        assert!(matches!(parse_seed(json), Err(SeedError::Parse { .. })));
    }

    #[rstest]
    fn load_seed_reads_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SEED.as_bytes()).expect("write seed");
        let users = load_seed(file.path()).expect("load seed");
        assert_eq!(users.len(), 2);
    }

    #[rstest]
    fn load_seed_reports_missing_files() {
        let err = load_seed(Path::new("/nonexistent/users.json")).expect_err("missing file");
        assert!(matches!(err, SeedError::Read { .. }));
    }
}
