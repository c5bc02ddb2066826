use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal Server Error")]
    Internal(String),
    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // the frontend keys off `status` for auth failures
            ApiError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "status": "fail",
                "message": msg
            })),
            ApiError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error"
                }))
            }
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error"
                }))
            }
        }
    }
}
