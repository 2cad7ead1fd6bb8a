//! # Request Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so every body error,
//! including a well-formed JSON value of the wrong shape, becomes a 400
//! with the structured error body rather than axum's plain-text default.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
