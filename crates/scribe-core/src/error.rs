//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - business rule failures raised by the services.
///
/// Every variant carries a fixed message; the HTTP boundary decides the status code.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Request-supplied actor id differs from the id carried by the token.
    #[error("The author ID from the request does not match the ID extracted from the token")]
    AuthorValidationFailed,

    /// Loaded entity is owned by someone other than the claimed actor.
    #[error("The author of the post does not match the provided authorId")]
    AuthorIsDifferent,

    #[error("Author Not Found")]
    UserNotFound,

    #[error("Category Not Found")]
    CategoryNotFound,

    #[error("Post Not Found")]
    PostNotFound,

    #[error("Comment Not Found")]
    CommentNotFound,

    #[error("Parent comment Not Found")]
    ParentCommentNotFound,

    #[error("Post Already in Published State")]
    PostAlreadyPublished,

    #[error("Post Already in Un-Published State")]
    PostAlreadyUnpublished,

    #[error("Post Not Published, you cannot add a comment")]
    PostNotPublished,

    #[error("Parent comment doesn't belong to the post")]
    ParentCommentNotBelongsToPost,

    #[error("Email Already Registered")]
    EmailAlreadyExists,

    #[error("Category Already Present")]
    CategoryAlreadyExists,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("New password and confirm password do not match")]
    PasswordConfirmationMismatch,

    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("New password cannot be the same as the current password")]
    PasswordReused,

    #[error("Mobile number does not match")]
    MobileNumberMismatch,

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error(transparent)]
    Repository(#[from] RepoError),

    /// Token issuing or password hashing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// True for both halves of the ownership rule: the token/claim guard and the
    /// loaded-entity owner check.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            DomainError::AuthorValidationFailed | DomainError::AuthorIsDifferent
        )
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Convenience alias used by every service operation.
pub type DomainResult<T> = Result<T, DomainError>;
