//! # Rule Set API
//!
//! Inspect the active rule snapshot and trigger a reload from disk.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use prisk_rules::RuleSnapshot;

use crate::error::AppError;
use crate::state::AppState;

/// Metadata of the active rule snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RuleSetInfo {
    /// Snapshot version; increments on every successful reload.
    pub version: u64,
    /// Hex SHA-256 of the rule document.
    pub digest: String,
    /// Free-form revision label from the document.
    pub label: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub source: Option<String>,
    pub rules: usize,
    pub constraints: usize,
    /// Rules and constraints whose condition does not parse.
    pub invalid_conditions: usize,
    /// Severity tiers, most severe first.
    pub precedence: Vec<String>,
    pub thresholds: BTreeMap<String, f64>,
}

impl From<&RuleSnapshot> for RuleSetInfo {
    fn from(snapshot: &RuleSnapshot) -> Self {
        let rules = &snapshot.rules;
        Self {
            version: snapshot.version,
            digest: snapshot.digest.clone(),
            label: rules.version.clone(),
            loaded_at: snapshot.loaded_at,
            source: snapshot.source.as_ref().map(|p| p.display().to_string()),
            rules: rules.rules.len(),
            constraints: rules.constraints.len(),
            invalid_conditions: rules.syntax_errors().len(),
            precedence: rules.precedence.levels().to_vec(),
            thresholds: rules
                .thresholds
                .iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Build the rule set router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/rules", get(rule_set_info))
        .route("/v1/rules/reload", post(reload_rules))
}

/// GET /v1/rules — Describe the active rule snapshot.
#[utoipa::path(
    get,
    path = "/v1/rules",
    responses(
        (status = 200, description = "Active rule snapshot", body = RuleSetInfo),
    ),
    tag = "rules"
)]
pub(crate) async fn rule_set_info(State(state): State<AppState>) -> Json<RuleSetInfo> {
    Json(RuleSetInfo::from(state.store.current().as_ref()))
}

/// POST /v1/rules/reload — Reload the rule file from disk.
#[utoipa::path(
    post,
    path = "/v1/rules/reload",
    responses(
        (status = 200, description = "New rule snapshot", body = RuleSetInfo),
        (status = 409, description = "Server was not started from a rule file", body = crate::error::ErrorBody),
        (status = 422, description = "Rule file rejected; previous snapshot still active", body = crate::error::ErrorBody),
    ),
    tag = "rules"
)]
pub(crate) async fn reload_rules(
    State(state): State<AppState>,
) -> Result<Json<RuleSetInfo>, AppError> {
    let store = state.store.clone();
    let snapshot = tokio::task::spawn_blocking(move || store.reload())
        .await
        .map_err(|e| AppError::Internal(format!("reload task failed: {e}")))??;
    Ok(Json(RuleSetInfo::from(snapshot.as_ref())))
}
