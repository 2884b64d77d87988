//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "vcred Registry API",
        version = "0.3.2",
        description = "Verifiable Credential lifecycle registry: issuance with delegated signing, lookup, verification, revocation, and rendering.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::credentials::issue_credential,
        crate::routes::credentials::list_credentials,
        crate::routes::credentials::get_credential,
        crate::routes::credentials::search_by_tags,
        crate::routes::credentials::search_by_claims,
        crate::routes::credentials::verify_credential,
        crate::routes::credentials::revoke_credential,
        crate::routes::render::render_credential,
    ),
    components(schemas(
        crate::routes::credentials::CredentialResponse,
        crate::routes::credentials::TagSearchRequest,
        crate::routes::credentials::ClaimSearchRequest,
        crate::routes::credentials::VerifyResponse,
        crate::routes::render::RenderFormat,
        crate::routes::render::RenderRequest,
        crate::routes::render::RenderResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "credentials", description = "Credential lifecycle API"),
        (name = "render", description = "Credential rendering API"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
