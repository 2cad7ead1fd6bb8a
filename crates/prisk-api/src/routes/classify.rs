//! # Classification API
//!
//! Accepts the raw questionnaire answers as a flat JSON object and returns
//! the classification computed against the rule snapshot that was current
//! when the request arrived.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use prisk_engine::{classify_traced, ClassificationResult, EvaluationTrace};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResponse {
    /// Severity tier from the rule set's precedence table.
    #[schema(example = "mid")]
    pub level: String,
    /// A data protection officer is required.
    pub dpo: bool,
    /// Registration is required.
    pub reg: bool,
    /// Reporting to the regulator is required.
    pub report: bool,
    /// Required compliance documents, in first-trigger order.
    pub requirements: Vec<String>,
}

impl From<ClassificationResult> for ClassificationResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            level: result.level.as_str().to_string(),
            dpo: result.dpo,
            reg: result.reg,
            report: result.report,
            requirements: result.requirements,
        }
    }
}

/// Classification result with the evaluation trace.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExplainResponse {
    pub result: ClassificationResponse,
    /// Derived facts, matched rule and applied constraint indices, whether
    /// the fallback decided the level, and swallowed condition errors.
    #[schema(value_type = Object)]
    pub trace: EvaluationTrace,
    /// Snapshot version the request was evaluated against.
    pub rules_version: u64,
    /// Digest of the rule document the request was evaluated against.
    pub rules_digest: String,
}

/// Build the classification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/classify", post(classify))
        .route("/v1/classify/explain", post(explain))
}

/// POST /v1/classify — Classify questionnaire answers.
#[utoipa::path(
    post,
    path = "/v1/classify",
    request_body = Object,
    responses(
        (status = 200, description = "Classification result", body = ClassificationResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
    ),
    tag = "classification"
)]
pub(crate) async fn classify(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ClassificationResponse>, AppError> {
    let answers = extract_json(body)?;
    let snapshot = state.store.current();
    let (result, _) = classify_traced(&snapshot.rules, &answers);
    Ok(Json(result.into()))
}

/// POST /v1/classify/explain — Classify and return the evaluation trace.
#[utoipa::path(
    post,
    path = "/v1/classify/explain",
    request_body = Object,
    responses(
        (status = 200, description = "Classification result and trace", body = ExplainResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorBody),
    ),
    tag = "classification"
)]
pub(crate) async fn explain(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ExplainResponse>, AppError> {
    let answers = extract_json(body)?;
    let snapshot = state.store.current();
    let (result, trace) = classify_traced(&snapshot.rules, &answers);
    Ok(Json(ExplainResponse {
        result: result.into(),
        trace,
        rules_version: snapshot.version,
        rules_digest: snapshot.digest.clone(),
    }))
}
