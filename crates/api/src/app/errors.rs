//! The uniform response envelope.
//!
//! Every response, success or failure, is
//! `{ success, data, message, timestamp }`; `data` is `null` on failure and
//! `Internal` detail never leaves the process.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

use stockroom_core::DomainError;

pub fn json_ok(
    status: StatusCode,
    data: serde_json::Value,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": true,
            "data": data,
            "message": message.into(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "data": null,
            "message": message.into(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        DomainError::Unauthenticated(msg) => json_error(StatusCode::UNAUTHORIZED, msg),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, msg),
        DomainError::Internal(detail) => {
            tracing::error!(%detail, "internal error");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor.",
            )
        }
    }
}
