//! Public account endpoints, plus logout.

use actix_web::{HttpResponse, web};

use scribe_core::domain::Role;
use scribe_core::services::{PasswordReset, Registration, mask_email};
use scribe_shared::MessageResponse;
use scribe_shared::dto::{AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest};

use super::{user_response, validated};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;
    let role = req
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|e| AppError::Validation(vec![e.to_string()]))?;

    let user = state
        .accounts
        .register(Registration {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            mobile_number: req.mobile_number,
            role,
            bio: req.bio,
            avatar: req.avatar,
        })
        .await?;

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// POST /api/v1/auth/authenticate
pub async fn authenticate(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;

    let issued = state
        .accounts
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: issued.access_token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}

/// PUT /api/v1/auth/forgot-password
pub async fn forgot_password(
    state: web::Data<AppState>,
    body: web::Json<ForgotPasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;

    state
        .accounts
        .forgot_password(PasswordReset {
            email: req.email,
            mobile_number: req.mobile_number,
            new_password: req.new_password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password Changed Successfully")))
}

/// POST /api/v1/auth/logout
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> HttpResponse {
    state.accounts.logout(&identity.token).await;
    tracing::info!(email = %mask_email(&identity.email), "logged out");

    HttpResponse::Ok().json(MessageResponse::new("Logout Successful"))
}
