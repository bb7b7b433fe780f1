use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use crate::core::validation::ValidationErrors;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Request validation failures, keyed by field
    #[error("{}", .0.message())]
    Validation(ValidationErrors),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "message": errors.message(),
                    "errors": errors.fields(),
                }))
            }
            AppError::NotFound(message) => HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "message": message,
            })),
            other => {
                // The underlying cause stays in the server log only.
                tracing::error!("request failed: {other}");

                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Sorry, something went wrong",
                }))
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Configuration(_)
            | AppError::HttpClient(_)
            | AppError::Json(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
