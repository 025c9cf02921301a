//! HTTP route handlers
//!
//! One module per endpoint:
//! - chat: the full store-generation pipeline
//! - upload: reference-image upload
//! - regenerate: single-asset image regeneration

pub mod chat;
pub mod regenerate;
pub mod upload;

use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// 400 with a human-readable message
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// 500 with a message and best-effort error detail
pub fn internal_error(message: impl Into<String>, details: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details(message, details)),
    )
        .into_response()
}
