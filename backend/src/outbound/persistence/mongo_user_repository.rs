//! MongoDB-backed `UserRepository` implementation.
//!
//! Documents in the `users` collection carry exactly the user fields with
//! the identifier stored as a native `ObjectId` under `_id`. Substring
//! criteria become case-insensitive regular expressions over quoted input,
//! so user-supplied fragments match literally.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Age, Criterion, NewUser, Role, User, UserId, UserPredicate};

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    age: i32,
    company: String,
    email: String,
    role: String,
    avatar: String,
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            name: user.name,
            age: i32::from(user.age.years()),
            company: user.company,
            email: user.email,
            role: user.role.as_str().to_owned(),
            avatar: user.avatar,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserPersistenceError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| UserPersistenceError::query("stored user has no _id"))?;
        let age = Age::new(i64::from(document.age))
            .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
        let role = document
            .role
            .parse::<Role>()
            .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
        Ok(User::new(
            UserId::from_bytes(id.bytes()),
            NewUser {
                name: document.name,
                age,
                company: document.company,
                email: document.email,
                role,
                avatar: document.avatar,
            },
        ))
    }
}

fn map_mongo_error(error: MongoError) -> UserPersistenceError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => UserPersistenceError::connection(error.to_string()),
        _ => UserPersistenceError::query(error.to_string()),
    }
}

fn object_id(id: &UserId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

fn contains_ignoring_case(fragment: &str) -> Document {
    doc! { "$regex": regex::escape(fragment), "$options": "i" }
}

/// Translate a predicate into a MongoDB filter document.
fn filter_for(predicate: &UserPredicate) -> Document {
    let mut filter = Document::new();
    for criterion in predicate.criteria() {
        let (field, condition) = match criterion {
            Criterion::AgeEquals(age) => ("age", Bson::Int32(i32::from(age.years()))),
            Criterion::CompanyContains(fragment) => {
                ("company", Bson::Document(contains_ignoring_case(fragment)))
            }
            Criterion::RoleEquals(role) => ("role", Bson::String(role.as_str().to_owned())),
            Criterion::NameContains(fragment) => {
                ("name", Bson::Document(contains_ignoring_case(fragment)))
            }
        };
        filter.insert(field, condition);
    }
    filter
}

/// Repository over a MongoDB `users` collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Connect to `uri` and use the `users` collection of `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, UserPersistenceError> {
        let client = Client::with_uri_str(uri).await.map_err(map_mongo_error)?;
        Ok(Self {
            users: client.database(database).collection(USERS_COLLECTION),
        })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_matching(
        &self,
        predicate: &UserPredicate,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .users
            .find(filter_for(predicate))
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;
        documents.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.users
            .find_one(doc! { "_id": object_id(id) })
            .await
            .map_err(map_mongo_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, UserPersistenceError> {
        let result = self
            .users
            .insert_one(UserDocument::from(user))
            .await
            .map_err(map_mongo_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(|oid| UserId::from_bytes(oid.bytes()))
            .ok_or_else(|| UserPersistenceError::query("store assigned a non-ObjectId _id"))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let result = self
            .users
            .delete_one(doc! { "_id": object_id(id) })
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_predicate_matches_everything() {
        assert!(filter_for(&UserPredicate::all()).is_empty());
    }

    #[rstest]
    fn criteria_become_field_conditions() {
        let predicate = UserPredicate::all()
            .and(Criterion::AgeEquals(Age::new(37).expect("age")))
            .and(Criterion::CompanyContains("ohm".to_owned()))
            .and(Criterion::RoleEquals(Role::Viewer));
        assert_eq!(
            filter_for(&predicate),
            doc! {
                "age": 37_i32,
                "company": { "$regex": "ohm", "$options": "i" },
                "role": "viewer",
            }
        );
    }

    #[rstest]
    fn regex_metacharacters_are_quoted() {
        let predicate = UserPredicate::all().and(Criterion::CompanyContains("a.b*".to_owned()));
        assert_eq!(
            filter_for(&predicate),
            doc! { "company": { "$regex": r"a\.b\*", "$options": "i" } }
        );
    }

    #[rstest]
    fn documents_convert_with_native_ids() {
        let oid = ObjectId::parse_str("5f8d0d55b54764421b7156c1").expect("object id");
        let user = User::try_from(UserDocument {
            id: Some(oid),
            name: "Sam".to_owned(),
            age: 45,
            company: "OHMNET".to_owned(),
            email: "sam@frogs.com".to_owned(),
            role: "viewer".to_owned(),
            avatar: String::new(),
        })
        .expect("valid document");
        assert_eq!(user.id().to_string(), "5f8d0d55b54764421b7156c1");
        assert_eq!(object_id(&user.id()), oid);
    }

    #[rstest]
    fn out_of_domain_documents_are_query_errors() {
        let result = User::try_from(UserDocument {
            id: Some(ObjectId::new()),
            name: "Old".to_owned(),
            age: 151,
            company: "X".to_owned(),
            email: "old@x.io".to_owned(),
            role: "viewer".to_owned(),
            avatar: String::new(),
        });
        assert!(matches!(result, Err(UserPersistenceError::Query { .. })));
    }
}
