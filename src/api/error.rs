use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    /// No Authorization header or no Bearer scheme -> 401
    #[error("Authorization header missing")]
    MissingToken,

    /// Malformed, badly signed or expired token -> 403
    #[error("Invalid token")]
    InvalidToken,

    /// Authenticated but not allowed -> 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Aggregate field-level failures -> 400
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Store-level unique key violation -> 409
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::error("Authorization header missing"),
            ),
            AppError::InvalidToken => {
                (StatusCode::FORBIDDEN, ApiResponse::error("Invalid token"))
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponse::error(msg)),
            AppError::Validation { message, errors } => {
                let body = if errors.is_empty() {
                    ApiResponse::error(message)
                } else {
                    ApiResponse::error_with(message, errors)
                };
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::error(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::error(msg)),
            AppError::Database(e) => {
                // Raw store errors are logged, never echoed to the client.
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal Server Error"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal Server Error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
