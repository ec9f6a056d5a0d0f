//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials for a guarded endpoint (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (403)
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<crate::service::auth::AuthError> for ApiError {
    fn from(err: crate::service::auth::AuthError) -> Self {
        use crate::service::auth::AuthError;
        match err {
            AuthError::Validation(msg) => ApiError::BadRequest(msg),
            AuthError::EmailTaken => {
                ApiError::BadRequest("User already exists with this email".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::BadRequest("Invalid email or password".to_string())
            }
            err @ AuthError::RoleMismatch { .. } => ApiError::BadRequest(err.to_string()),
            AuthError::Token(msg) | AuthError::Hashing(msg) => ApiError::Internal(msg),
            AuthError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::service::journal::JournalServiceError> for ApiError {
    fn from(err: crate::service::journal::JournalServiceError) -> Self {
        use crate::service::journal::JournalServiceError;
        match err {
            JournalServiceError::EmptyEntry => {
                ApiError::BadRequest("Journal entry is required".to_string())
            }
            JournalServiceError::Persistence { source, .. } => {
                ApiError::Database(source.to_string())
            }
            JournalServiceError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::service::assessment::AssessmentServiceError> for ApiError {
    fn from(err: crate::service::assessment::AssessmentServiceError) -> Self {
        use crate::service::assessment::AssessmentServiceError;
        match err {
            AssessmentServiceError::MissingAnswers => {
                ApiError::BadRequest("Assessment data is required".to_string())
            }
            AssessmentServiceError::Persistence { source, .. } => {
                ApiError::Database(source.to_string())
            }
            AssessmentServiceError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::service::chat::ChatServiceError> for ApiError {
    fn from(err: crate::service::chat::ChatServiceError) -> Self {
        use crate::service::chat::ChatServiceError;
        match err {
            ChatServiceError::EmptyMessage => {
                ApiError::BadRequest("Message is required".to_string())
            }
            ChatServiceError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::service::directory::DirectoryServiceError> for ApiError {
    fn from(err: crate::service::directory::DirectoryServiceError) -> Self {
        use crate::service::directory::DirectoryServiceError;
        match err {
            DirectoryServiceError::Validation(msg) => ApiError::BadRequest(msg),
            DirectoryServiceError::ProfessionalNotFound(id) => {
                ApiError::NotFound(format!("Professional {}", id))
            }
            DirectoryServiceError::ShelterNotFound(id) => {
                ApiError::NotFound(format!("Shelter {}", id))
            }
            DirectoryServiceError::ProfessionalUnavailable => {
                ApiError::BadRequest("Professional is currently unavailable".to_string())
            }
            DirectoryServiceError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        match err {
            crate::db::DbError::NotFound(id) => ApiError::NotFound(id),
            _ => ApiError::Database(err.to_string()),
        }
    }
}
