//! API error responses.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Structured error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<Detail>);

pub fn detail(status: StatusCode, err: impl std::fmt::Display) -> ApiError {
    (
        status,
        Json(Detail {
            detail: err.to_string(),
        }),
    )
}

pub fn bad_request(err: impl std::fmt::Display) -> ApiError {
    detail(StatusCode::BAD_REQUEST, err)
}

pub fn internal(err: impl std::fmt::Display) -> ApiError {
    detail(StatusCode::INTERNAL_SERVER_ERROR, err)
}
