//! # prisk-api — HTTP Surface for the Privacy Risk Classifier
//!
//! ## API Surface
//!
//! | Route                        | Module                  | Purpose                         |
//! |------------------------------|-------------------------|---------------------------------|
//! | `POST /v1/classify`          | [`routes::classify`]    | Classify questionnaire answers  |
//! | `POST /v1/classify/explain`  | [`routes::classify`]    | Classification plus trace       |
//! | `GET /v1/rules`              | [`routes::rules`]       | Active rule snapshot metadata   |
//! | `POST /v1/rules/reload`      | [`routes::rules`]       | Reload the rule file            |
//! | `GET /openapi.json`          | [`openapi`]             | Generated OpenAPI document      |
//! | `GET /health/*`              | here                    | Liveness and readiness probes   |
//!
//! Classification is synchronous and CPU-bound in the microseconds, so
//! handlers run it inline. Only file I/O (reload) goes to the blocking
//! pool.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod watch;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::classify::router())
        .merge(routes::rules::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the server only starts once a rule set is loaded, so
/// a serving process is ready.
async fn readiness() -> &'static str {
    "ready"
}
