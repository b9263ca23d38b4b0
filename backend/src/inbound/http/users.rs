//! User directory HTTP handlers.
//!
//! ```text
//! GET    /api/users?age=37&company=ohm&role=viewer&name=ja&sortBy=age&sortOrder=desc
//! GET    /api/users/{id}
//! GET    /api/usersByCompany?sortBy=count&sortOrder=desc
//! POST   /api/users {"name":"Jamie","age":37,"company":"OHMNET","email":"jamie@frogs.com","role":"viewer"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, GroupSummary, NewUserCandidate, QueryParams, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One company group in `GET /api/usersByCompany`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyGroupResponse {
    /// Company name exactly as stored.
    #[serde(rename = "_id")]
    #[schema(example = "OHMNET")]
    pub company: String,
    /// Number of users in the group.
    #[schema(example = 2)]
    pub count: usize,
    /// Group members ordered by name.
    pub users: Vec<User>,
}

impl From<GroupSummary> for CompanyGroupResponse {
    fn from(summary: GroupSummary) -> Self {
        let count = summary.count();
        let (company, users) = summary.into_parts();
        Self {
            company,
            count,
            users,
        }
    }
}

/// Body of a successful `POST /api/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    /// Identifier assigned by the store.
    #[schema(example = "5f8d0d55b54764421b7156c1")]
    pub id: String,
}

fn query_params(req: &HttpRequest) -> Result<QueryParams, Error> {
    web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(|pairs| pairs.into_inner().into_iter().collect())
        .map_err(|err| {
            Error::invalid_request(format!("malformed query string: {err}")).with_details(json!({
                "value": req.query_string(),
                "code": "malformed_query",
            }))
        })
}

/// List users matching every supplied filter.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("age" = Option<u8>, Query, description = "Exact age, 0 to 150"),
        ("company" = Option<String>, Query, description = "Case-insensitive company substring"),
        ("role" = Option<String>, Query, description = "One of admin, editor, viewer"),
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("sortBy" = Option<String>, Query, description = "company, name or age"),
        ("sortOrder" = Option<String>, Query, description = "asc (default) or desc")
    ),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 400, description = "Invalid parameter", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<User>>> {
    let params = query_params(&req)?;
    let users = state.users_query.list_users(&params).await?;
    Ok(web::Json(users))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "24 hex digit user id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users_query.get_user(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Group matching users by company.
#[utoipa::path(
    get,
    path = "/api/usersByCompany",
    params(
        ("sortBy" = Option<String>, Query, description = "company (default) or count"),
        ("sortOrder" = Option<String>, Query, description = "asc (default) or desc"),
        ("age" = Option<u8>, Query, description = "Exact age, 0 to 150"),
        ("company" = Option<String>, Query, description = "Case-insensitive company substring"),
        ("role" = Option<String>, Query, description = "One of admin, editor, viewer"),
        ("name" = Option<String>, Query, description = "Case-insensitive name substring")
    ),
    responses(
        (status = 200, description = "Company groups", body = [CompanyGroupResponse]),
        (status = 400, description = "Invalid parameter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "usersByCompany"
)]
#[get("/usersByCompany")]
pub async fn users_by_company(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<CompanyGroupResponse>>> {
    let params = query_params(&req)?;
    let groups = state.users_query.grouped_by_company(&params).await?;
    Ok(web::Json(groups.into_iter().map(Into::into).collect()))
}

/// Validate and store a new user.
///
/// The avatar is always derived from the email; a supplied `avatar` or `_id`
/// is ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUserCandidate,
    responses(
        (status = 201, description = "User created", body = CreatedUserResponse),
        (status = 400, description = "Validation failed; details list every violation", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/users")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUserCandidate>,
) -> ApiResult<HttpResponse> {
    let id = state.users_command.add_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedUserResponse { id: id.to_string() }))
}

/// Delete a user by identifier.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "24 hex digit user id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.users_command.delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Register the user routes under the current scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(users_by_company)
        .service(get_user)
        .service(add_user)
        .service(delete_user);
}

/// JSON body configuration reporting decode failures in the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": "malformed_body" }))
            .into()
    })
}
