//! Self-service profile and password endpoints.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Id, Role};
use scribe_core::services::{PasswordChange, ProfileUpdate};
use scribe_shared::MessageResponse;
use scribe_shared::dto::{ChangePasswordRequest, UpdateUserRequest};

use super::{user_response, validated};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const READERS: &[Role] = &[Role::Read, Role::Write];

/// PUT /api/v1/users/{user_id}
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(READERS)?;
    let req = validated(body)?;

    let user = state
        .accounts
        .update_profile(
            path.into_inner(),
            ProfileUpdate {
                full_name: req.full_name,
                bio: req.bio,
                avatar: req.avatar,
                mobile_number: req.mobile_number,
            },
            identity.user_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// PUT /api/v1/users/password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(READERS)?;
    let req = validated(body)?;

    state
        .accounts
        .change_password(
            PasswordChange {
                email: req.email,
                current_password: req.current_password,
                new_password: req.new_password,
                confirm_password: req.confirm_password,
            },
            identity.user_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password Changed Successfully")))
}
