//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod users;

use actix_web::web;

use scribe_core::domain::{Category, CommentThread, Post, User};
use scribe_shared::Validate;
use scribe_shared::dto::{CategoryResponse, CommentResponse, PostResponse, UserResponse};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/authenticate", web::post().to(auth::authenticate))
                    .route("/forgot-password", web::put().to(auth::forgot_password))
                    .route("/logout", web::post().to(auth::logout)),
            )
            .service(
                web::scope("/users")
                    .route("/password", web::put().to(users::change_password))
                    .route("/{user_id}", web::put().to(users::update_profile)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/published", web::get().to(posts::list_published))
                    .route("/{post_id}", web::put().to(posts::update_post)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create_comment))
                    .route("/{comment_id}", web::get().to(comments::comment_thread))
                    .route("/{comment_id}", web::put().to(comments::edit_comment)),
            )
            .service(
                web::scope("/authors/{author_id}")
                    .route(
                        "/posts/{post_id}/publish",
                        web::put().to(posts::publish_post),
                    )
                    .route(
                        "/posts/{post_id}/unpublish",
                        web::put().to(posts::unpublish_post),
                    )
                    .route("/posts/{post_id}", web::delete().to(posts::delete_post))
                    .route(
                        "/comments/{comment_id}",
                        web::delete().to(comments::delete_comment),
                    ),
            )
            .service(
                web::scope("/categories")
                    .route("", web::post().to(categories::create_category))
                    .route("", web::get().to(categories::list_categories))
                    .route("/{category_id}", web::delete().to(categories::delete_category)),
            )
            .service(
                web::scope("/admin")
                    .route("/posts/{post_id}", web::delete().to(posts::admin_delete_post))
                    .route(
                        "/comments/{comment_id}",
                        web::delete().to(comments::admin_delete_comment),
                    ),
            ),
    );
}

fn validated<T: Validate>(body: web::Json<T>) -> Result<T, AppError> {
    let body = body.into_inner();
    body.validate().map_err(AppError::Validation)?;
    Ok(body)
}

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        full_name: user.full_name,
        email: user.email,
        mobile_number: user.mobile_number,
        role: user.role.to_string(),
        bio: user.bio,
        avatar: user.avatar,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author_id: post.author_id,
        category_id: post.category_id,
        featured: post.featured,
        draft: post.draft,
        published: post.published,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn thread_response(thread: CommentThread) -> CommentResponse {
    let comment = thread.comment;
    CommentResponse {
        id: comment.id,
        content: comment.content,
        author_id: comment.author_id,
        author_name: thread.author_name,
        post_id: comment.post_id,
        parent_id: comment.parent_id,
        replies: thread.replies.into_iter().map(thread_response).collect(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::state::AppState;

    /// Register an account and log it in, yielding its bearer token.
    macro_rules! token_for {
        ($app:expr, $email:expr, $role:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({
                    "full_name": "Test User",
                    "email": $email,
                    "password": "s3cret-pass",
                    "mobile_number": "0123456789",
                    "role": $role,
                }))
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let req = test::TestRequest::post()
                .uri("/api/v1/auth/authenticate")
                .set_json(json!({ "email": $email, "password": "s3cret-pass" }))
                .to_request();
            let body: Value = test::call_and_read_body_json($app, req).await;
            body["access_token"].as_str().unwrap().to_string()
        }};
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_publish_flow_over_http() {
        let state = AppState::in_memory().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let token = token_for!(&app, "ada@example.com", Some("WRITE"));

        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Hello", "content": "World", "author_id": 1 }))
            .to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post["draft"], true);
        let post_id = post["id"].as_i64().unwrap();

        let publish = || {
            test::TestRequest::put()
                .uri(&format!("/api/v1/authors/1/posts/{post_id}/publish"))
                .insert_header(bearer(&token))
                .to_request()
        };
        let resp = test::call_service(&app, publish()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, publish()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Post Already in Published State");

        let req = test::TestRequest::post()
            .uri("/api/v1/comments")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "First!", "author_id": 1, "post_id": post_id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let comment: Value = test::read_body_json(resp).await;
        assert_eq!(comment["author_name"], "Test User");
        assert_eq!(comment["replies"], json!([]));

        // Claiming another author's id is rejected before any lookup.
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/authors/2/posts/{post_id}/unpublish"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_authenticate_reports_token_lifetime() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory().await))
                .configure(configure_routes),
        )
        .await;
        token_for!(&app, "ada@example.com", Some("WRITE"));

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/authenticate")
            .set_json(json!({ "email": "ada@example.com", "password": "s3cret-pass" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["expires_in"], 24 * 3600);
    }

    #[actix_web::test]
    async fn test_role_and_token_gating() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory().await))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let reader = token_for!(&app, "reader@example.com", None::<&str>);
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(bearer(&reader))
            .set_json(json!({ "title": "Hello", "content": "World", "author_id": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(bearer(&reader))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/posts")
            .insert_header(bearer(&reader))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_body_lists_field_errors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory().await))
                .configure(configure_routes),
        )
        .await;
        let token = token_for!(&app, "ada@example.com", Some("WRITE"));

        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": " ", "content": "", "author_id": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }
}
