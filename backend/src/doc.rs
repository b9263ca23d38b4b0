//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user directory endpoints, the health probes and
//! the domain schemas they exchange. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, NewUserCandidate, Role, User, ValidationViolation};
use crate::inbound::http::users::{CompanyGroupResponse, CreatedUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Query, group, create and delete user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::users_by_company,
        crate::inbound::http::users::add_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Role,
        Error,
        ErrorCode,
        NewUserCandidate,
        ValidationViolation,
        CompanyGroupResponse,
        CreatedUserResponse
    )),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("User", "_id")]
    #[case("User", "avatar")]
    #[case("CompanyGroupResponse", "_id")]
    #[case("ValidationViolation", "rejectedValue")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).unwrap_or_else(|| panic!("{schema} schema"));
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{id}")]
    #[case("/api/usersByCompany")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/usersByCompany")]
    fn listing_paths_document_every_filter(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        let params: Vec<String> = doc
            .paths
            .paths
            .get(path)
            .and_then(|item| item.get.as_ref())
            .and_then(|operation| operation.parameters.as_ref())
            .map(|params| params.iter().map(|param| param.name.clone()).collect())
            .unwrap_or_default();
        for filter in ["age", "company", "role", "name", "sortBy", "sortOrder"] {
            assert!(
                params.iter().any(|name| name == filter),
                "{path} should document {filter}"
            );
        }
    }
}
