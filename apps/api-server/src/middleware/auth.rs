//! Authentication extractor and role gating.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use scribe_core::domain::{Id, Role};
use scribe_core::ports::{AuthError, TokenClaims, bearer_token};
use scribe_core::services::guard;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller, taken from a verified, non-revoked bearer token.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Id,
    pub email: String,
    pub role: Role,
    /// The raw token, kept so logout can revoke it.
    pub token: String,
}

impl Identity {
    fn from_claims(claims: TokenClaims, token: String) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
            token,
        }
    }

    /// Reject the request with 403 unless the caller holds one of `required`.
    pub fn require_any_role(&self, required: &[Role]) -> Result<(), AppError> {
        if guard::has_any_role(self.role, required) {
            Ok(())
        } else {
            tracing::warn!(user_id = self.user_id, role = %self.role, "role not permitted");
            Err(AppError::Forbidden)
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::MissingAuth
            | AuthError::InvalidCredentials => actix_web::http::StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => actix_web::http::StatusCode::FORBIDDEN,
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use scribe_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::unauthorized(
                "Your authentication token has expired. Please login again.",
            ),
            AuthError::InvalidToken(_) | AuthError::InvalidCredentials => {
                ErrorResponse::unauthorized("Invalid or revoked token")
            }
            AuthError::MissingAuth => ErrorResponse::unauthorized(
                "Please provide a valid Bearer token in the Authorization header.",
            ),
            AuthError::InsufficientPermissions => ErrorResponse::forbidden(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                )));
            };

            let header_value = match header_value {
                None => return Err(AuthenticationError(AuthError::MissingAuth)),
                Some(Err(_)) => {
                    return Err(AuthenticationError(AuthError::InvalidToken(
                        "Invalid authorization header".to_string(),
                    )));
                }
                Some(Ok(value)) => value,
            };

            let token = bearer_token(&header_value).ok_or_else(|| {
                AuthenticationError(AuthError::InvalidToken(
                    "Expected Bearer token".to_string(),
                ))
            })?;

            let claims = state.tokens.validate_token(token).map_err(AuthenticationError)?;

            if state.denylist.is_revoked(token).await {
                tracing::debug!(user_id = claims.user_id, "revoked token presented");
                return Err(AuthenticationError(AuthError::InvalidToken(
                    "Token has been revoked".to_string(),
                )));
            }

            Ok(Identity::from_claims(claims, token.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: 1,
            email: "ada@example.com".to_string(),
            role,
            token: "token".to_string(),
        }
    }

    #[test]
    fn test_require_any_role() {
        assert!(identity(Role::Write).require_any_role(&[Role::Read, Role::Write]).is_ok());
        assert!(matches!(
            identity(Role::Read).require_any_role(&[Role::Admin]),
            Err(AppError::Forbidden)
        ));
    }
}
