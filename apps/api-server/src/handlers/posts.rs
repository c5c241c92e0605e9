//! Post endpoints.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Id, Role};
use scribe_core::services::PostDraft;
use scribe_shared::MessageResponse;
use scribe_shared::dto::PostRequest;

use super::{post_response, validated};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const WRITERS: &[Role] = &[Role::Write];
const READERS: &[Role] = &[Role::Read, Role::Write];

fn draft(req: PostRequest) -> PostDraft {
    PostDraft {
        title: req.title,
        content: req.content,
        author_id: req.author_id,
        category_id: req.category_id,
        featured: req.featured,
    }
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let req = validated(body)?;

    let post = state.posts.create_post(draft(req), identity.user_id).await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/v1/posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let req = validated(body)?;

    let post = state
        .posts
        .update_post(path.into_inner(), draft(req), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /api/v1/authors/{author_id}/posts/{post_id}/publish
pub async fn publish_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Id, Id)>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let (author_id, post_id) = path.into_inner();

    let post = state
        .posts
        .publish_post(post_id, author_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /api/v1/authors/{author_id}/posts/{post_id}/unpublish
pub async fn unpublish_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Id, Id)>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let (author_id, post_id) = path.into_inner();

    let post = state
        .posts
        .unpublish_post(post_id, author_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/v1/authors/{author_id}/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Id, Id)>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let (author_id, post_id) = path.into_inner();

    state
        .posts
        .delete_post(post_id, author_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post Deleted Successfully")))
}

/// DELETE /api/v1/admin/posts/{post_id}
pub async fn admin_delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Admin])?;

    state.posts.admin_delete_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post Deleted Successfully")))
}

/// GET /api/v1/posts
pub async fn list_posts(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    identity.require_any_role(READERS)?;

    let posts = state.posts.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_response).collect::<Vec<_>>()))
}

/// GET /api/v1/posts/published
pub async fn list_published(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    identity.require_any_role(READERS)?;

    let posts = state.posts.list_published().await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_response).collect::<Vec<_>>()))
}
