//! Comment endpoints.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Id, Role};
use scribe_core::services::NewComment;
use scribe_shared::MessageResponse;
use scribe_shared::dto::{CommentRequest, EditCommentRequest};

use super::{thread_response, validated};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const WRITERS: &[Role] = &[Role::Write];

/// POST /api/v1/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let req = validated(body)?;

    let comment = state
        .comments
        .create_comment(
            NewComment {
                content: req.content,
                author_id: req.author_id,
                post_id: req.post_id,
                parent_id: req.parent_id,
            },
            identity.user_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(thread_response(comment)))
}

/// PUT /api/v1/comments/{comment_id}
pub async fn edit_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
    body: web::Json<EditCommentRequest>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let req = validated(body)?;

    let comment = state
        .comments
        .edit_comment(path.into_inner(), req.content, req.author_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(thread_response(comment)))
}

/// GET /api/v1/comments/{comment_id} - the comment with its whole reply tree.
pub async fn comment_thread(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Read, Role::Write])?;

    let thread = state.comments.comment_thread(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(thread_response(thread)))
}

/// DELETE /api/v1/authors/{author_id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Id, Id)>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(WRITERS)?;
    let (author_id, comment_id) = path.into_inner();

    state
        .comments
        .delete_comment(comment_id, author_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment Deleted Successfully")))
}

/// DELETE /api/v1/admin/comments/{comment_id}
pub async fn admin_delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    identity.require_any_role(&[Role::Admin])?;

    state
        .comments
        .admin_delete_comment(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment Deleted Successfully")))
}
