//! Storage adapters for the `users` collection.
//!
//! Adapters translate between stored documents and domain types and map
//! store failures onto [`crate::domain::ports::UserPersistenceError`]. They
//! contain no business rules.
//!
//! - [`InMemoryUserRepository`]: process-local collection, the default.
//! - `MongoUserRepository`: MongoDB collection, behind the `mongo` feature.
//! - [`load_seed`]: development fixtures for the in-memory collection.

mod in_memory_user_repository;
#[cfg(feature = "mongo")]
mod mongo_user_repository;
mod seed;

pub use in_memory_user_repository::InMemoryUserRepository;
#[cfg(feature = "mongo")]
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
pub use seed::{SeedError, load_seed, parse_seed};
