//! Category endpoints, administrators only.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Id, Role};
use scribe_shared::MessageResponse;
use scribe_shared::dto::CategoryRequest;

use super::{category_response, validated};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Admin])?;
    let req = validated(body)?;

    let category = state.categories.create_category(req.name).await?;

    Ok(HttpResponse::Created().json(category_response(category)))
}

/// DELETE /api/v1/categories/{category_id}
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Admin])?;

    state.categories.delete_category(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Category Deleted Successfully")))
}

/// GET /api/v1/categories
pub async fn list_categories(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Admin])?;

    let categories = state.categories.list_categories().await?;

    Ok(HttpResponse::Ok().json(
        categories
            .into_iter()
            .map(category_response)
            .collect::<Vec<_>>(),
    ))
}
