//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `USER_DIRECTORY_*` environment variables, a config file
//! or the command line. Accessors apply the defaults.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::Path;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Port the server binds to when none is configured.
pub const DEFAULT_PORT: u16 = 4567;
/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "dev";

/// Configuration for the user directory server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct DirectorySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// MongoDB connection string. Only honoured with the `mongo` feature.
    pub mongo_uri: Option<String>,
    /// MongoDB database holding the `users` collection.
    pub database: Option<String>,
    /// JSON file of users loaded into the in-memory store on startup.
    pub seed_path: Option<PathBuf>,
}

impl DirectorySettings {
    /// Configured bind address, defaulting to all interfaces on port 4567.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    /// Configured database name.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Configured MongoDB URI, ignoring blank values.
    pub fn mongo_uri(&self) -> Option<&str> {
        self.mongo_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }

    /// Configured seed file, if any.
    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }
}
