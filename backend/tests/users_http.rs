//! End-to-end tests of the user directory HTTP surface over the seeded
//! in-memory store.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use user_directory::Trace;
use user_directory::domain::TRACE_ID_HEADER;
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::users::{configure, json_config};
use user_directory::outbound::persistence::{InMemoryUserRepository, load_seed};

const JAMIE_ID: &str = "5f8d0d55b54764421b7156c2";

#[fixture]
fn repo() -> Arc<InMemoryUserRepository> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/users.json");
    Arc::new(InMemoryUserRepository::with_users(
        load_seed(&path).expect("fixture seed loads"),
    ))
}

macro_rules! directory_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::for_repository($repo)))
                .app_data(json_config())
                .wrap(Trace)
                .service(web::scope("/api").configure(configure)),
        )
        .await
    };
}

fn field<'a>(body: &'a Value, name: &str) -> Vec<&'a str> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|entry| entry[name].as_str())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn combined_filters_narrow_the_listing(repo: Arc<InMemoryUserRepository>) {
    let app = directory_app!(repo);
    let req = test::TestRequest::get()
        .uri("/api/users?age=37&company=OHM")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(field(&body, "_id"), [JAMIE_ID]);
}

#[rstest]
#[actix_web::test]
async fn listing_sorted_by_company_descending(repo: Arc<InMemoryUserRepository>) {
    let app = directory_app!(repo);
    let req = test::TestRequest::get()
        .uri("/api/users?sortBy=company&sortOrder=desc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(field(&body, "name"), ["Chris", "Jamie", "Sam", "Pat"]);
}

#[rstest]
#[actix_web::test]
async fn grouping_by_company_counts_members(repo: Arc<InMemoryUserRepository>) {
    let app = directory_app!(repo);
    let req = test::TestRequest::get().uri("/api/usersByCompany").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(field(&body, "_id"), ["IBM", "OHMNET", "UMM"]);
    assert_eq!(body[1]["count"], 2);
    assert_eq!(field(&body[1]["users"], "name"), ["Jamie", "Sam"]);
}

#[rstest]
#[actix_web::test]
async fn created_users_can_be_fetched_and_deleted(repo: Arc<InMemoryUserRepository>) {
    let app = directory_app!(repo.clone());

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "name": "Robin",
                "age": 0,
                "company": "Acme",
                "email": "robin@acme.io",
                "role": "admin",
            }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().expect("created id").to_owned();
    assert_eq!(repo.len().await, 5);

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched["name"], "Robin");
    assert_eq!(fetched["role"], "admin");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn error_bodies_carry_the_response_trace_id(repo: Arc<InMemoryUserRepository>) {
    let app = directory_app!(repo);
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users?age=200")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header);
    assert_eq!(body["details"]["field"], "age");
}
