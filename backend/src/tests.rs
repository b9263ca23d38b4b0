//! Tests for the application bootstrap, covering store selection and
//! readiness signalling.

use std::ffi::OsString;
use std::io::Write;
use std::net::SocketAddr;

use actix_web::web;
use env_lock::lock_env;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use user_directory::DirectorySettings;
use user_directory::domain::QueryParams;
use user_directory::inbound::http::health::HealthState;

use super::server::{ServerConfig, build_http_state, create_server};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn settings_with_seed(seed: Option<&std::path::Path>) -> DirectorySettings {
    let _guard = lock_env([
        ("USER_DIRECTORY_BIND_ADDR", None::<String>),
        ("USER_DIRECTORY_MONGO_URI", None::<String>),
        ("USER_DIRECTORY_DATABASE", None::<String>),
        (
            "USER_DIRECTORY_SEED_PATH",
            seed.map(|path| path.display().to_string()),
        ),
    ]);
    DirectorySettings::load_from_iter([OsString::from("user-directory")])
        .expect("config should load")
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    bind_address: SocketAddr,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new(bind_address);
    assert_eq!(config.bind_addr(), bind_address);
    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn seeded_store_serves_seed_users() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(
        br#"[{"name":"Sam","age":45,"company":"OHMNET","email":"sam@frogs.com","role":"viewer"}]"#,
    )
    .expect("write seed");

    let state = build_http_state(&settings_with_seed(Some(file.path())))
        .await
        .expect("state should build");
    let users = state
        .users_query
        .list_users(&QueryParams::new())
        .await
        .expect("list users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name(), "Sam");
}

#[rstest]
#[actix_rt::test]
async fn missing_seed_file_fails_startup() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.json");

    let result = build_http_state(&settings_with_seed(Some(&missing))).await;
    assert!(result.is_err());
}

#[rstest]
#[actix_rt::test]
async fn unseeded_store_starts_empty() {
    let state = build_http_state(&settings_with_seed(None))
        .await
        .expect("state should build");
    let users = state
        .users_query
        .list_users(&QueryParams::new())
        .await
        .expect("list users");
    assert!(users.is_empty());
}
