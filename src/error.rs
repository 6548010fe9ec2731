use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// JSON error response structure
///
/// Matches the envelope used by the browser frontend:
/// `{ "error": "Too Many Requests", "message": "..." }`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Daily generation quota exhausted. Carries the user-facing message
    /// with usage numbers already formatted.
    #[error("{0}")]
    LimitExceeded(String),

    /// A database query failed while executing a named operation.
    /// The context identifies which check or fetch failed; the cause
    /// is preserved for logging.
    #[error("{context}: {source}")]
    StoreQuery {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wraps a store error with the operation it interrupted.
    pub fn store(context: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::StoreQuery {
            context: context.into(),
            source,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::LimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::StoreQuery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Translation(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(_) => "Not Found",
            AppError::Validation(_) => "Bad Request",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::LimitExceeded(_) => "Too Many Requests",
            AppError::StoreQuery { .. } | AppError::Database(_) | AppError::Internal(_) => {
                "Internal Server Error"
            }
            AppError::Translation(_) => "Bad Gateway",
        };

        // Database failures are logged with their cause but never leak
        // query details to the client.
        let message = match self {
            AppError::StoreQuery { .. } | AppError::Database(_) | AppError::Internal(_) => {
                log::error!("{}", self);
                None
            }
            other => Some(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message,
        })
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
