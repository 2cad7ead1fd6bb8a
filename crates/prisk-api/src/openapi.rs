//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "prisk API",
        version = "0.1.0",
        description = "Privacy risk classification: severity tier, DPO/registration/reporting obligations, and required compliance documents for a data-protection questionnaire.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::classify::classify,
        crate::routes::classify::explain,
        crate::routes::rules::rule_set_info,
        crate::routes::rules::reload_rules,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::classify::ClassificationResponse,
        crate::routes::classify::ExplainResponse,
        crate::routes::rules::RuleSetInfo,
    )),
    tags(
        (name = "classification", description = "Questionnaire classification"),
        (name = "rules", description = "Rule repository snapshot"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI JSON at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
