//! Select and wire the user store from settings.

use std::io;
use std::sync::Arc;

use tracing::info;
#[cfg(not(feature = "mongo"))]
use tracing::warn;

use user_directory::DirectorySettings;
use user_directory::inbound::http::state::HttpState;
#[cfg(feature = "mongo")]
use user_directory::outbound::persistence::MongoUserRepository;
use user_directory::outbound::persistence::{InMemoryUserRepository, load_seed};

/// Build handler state over the configured store.
///
/// MongoDB is used when the `mongo` feature is compiled and a URI is set.
/// Otherwise users live in memory, optionally seeded from `seed_path`.
///
/// # Errors
/// Returns [`io::Error`] when the store cannot be reached or the seed file
/// cannot be loaded.
pub(crate) async fn build_http_state(settings: &DirectorySettings) -> io::Result<HttpState> {
    #[cfg(feature = "mongo")]
    if let Some(uri) = settings.mongo_uri() {
        let repo = MongoUserRepository::connect(uri, settings.database())
            .await
            .map_err(|err| io::Error::other(format!("failed to connect to MongoDB: {err}")))?;
        info!(database = settings.database(), "using MongoDB user store");
        return Ok(HttpState::for_repository(Arc::new(repo)));
    }

    #[cfg(not(feature = "mongo"))]
    if settings.mongo_uri().is_some() {
        warn!("mongo_uri is set but the mongo feature is not compiled; using in-memory store");
    }

    let users = match settings.seed_path() {
        Some(path) => load_seed(path).map_err(io::Error::other)?,
        None => Vec::new(),
    };
    info!(users = users.len(), "using in-memory user store");
    Ok(HttpState::for_repository(Arc::new(
        InMemoryUserRepository::with_users(users),
    )))
}
