use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::{AppError, ErrorCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log before the variant is consumed by the mapping.
        tracing::error!(error = ?self, "Request failed");

        // Only validation failures leak their message to the client; every
        // other variant's detail stays in the log.
        let (status, code, message) = match self {
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                None,
            ),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ErrorCode::InvalidCredentials, None)
            }
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthenticated, None)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorCode::NotFound, None),
            AppError::Refresh(_) => (StatusCode::BAD_GATEWAY, ErrorCode::RefreshFailed, None),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                None,
            ),
        };

        let body = match message {
            Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
            None => serde_json::json!({ "code": code.as_str() }),
        };
        (status, Json(body)).into_response()
    }
}
