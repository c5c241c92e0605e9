//! Authentication ports: token verification, password hashing, token revocation.

use async_trait::async_trait;

use crate::domain::{Id, Role, User};

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Numeric identity of the account; this is the actor id for ownership checks.
    pub user_id: Id,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

/// Issues and verifies bearer tokens. Tokens reaching `validate_token` must
/// already have their `Bearer ` scheme prefix removed.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a user.
    fn generate_token(&self, user: &User) -> Result<String, AuthError>;

    /// Verify signature, issuer and expiry, and decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of newly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Tokens revoked by logout before their natural expiry.
#[async_trait]
pub trait TokenDenylist: Send + Sync {
    /// Reject `token` until `expires_at` (unix seconds).
    async fn revoke(&self, token: &str, expires_at: i64);

    async fn is_revoked(&self, token: &str) -> bool;
}

/// Strip the `Bearer ` scheme from an Authorization header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
