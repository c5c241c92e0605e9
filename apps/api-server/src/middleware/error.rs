//! Error handling - maps domain failures onto the JSON error envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use scribe_core::error::{DomainError, RepoError};
use scribe_shared::ErrorResponse;
use std::fmt;

/// Application-level error type returned by every handler.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
    Conflict(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::BadRequest(message) => ErrorResponse::bad_request(message),
            AppError::Unauthorized(message) => ErrorResponse::unauthorized(message),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::Conflict(message) => ErrorResponse::conflict(message),
            AppError::Internal(detail) => {
                // Logged here, never returned.
                tracing::error!(detail = %detail, "Internal error");
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::bad_request("Validation failed").with_errors(errors.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::AuthorValidationFailed
            | DomainError::AuthorIsDifferent
            | DomainError::PasswordConfirmationMismatch
            | DomainError::CurrentPasswordIncorrect
            | DomainError::PasswordReused
            | DomainError::MobileNumberMismatch => AppError::BadRequest(message),

            DomainError::InvalidCredentials => AppError::Unauthorized(message),

            DomainError::UserNotFound
            | DomainError::CategoryNotFound
            | DomainError::PostNotFound
            | DomainError::CommentNotFound
            | DomainError::ParentCommentNotFound
            | DomainError::ParentCommentNotBelongsToPost => AppError::NotFound(message),

            DomainError::PostAlreadyPublished
            | DomainError::PostAlreadyUnpublished
            | DomainError::PostNotPublished
            | DomainError::EmailAlreadyExists
            | DomainError::CategoryAlreadyExists => AppError::Conflict(message),

            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Repository(err) => err.into(),
            DomainError::Auth(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
