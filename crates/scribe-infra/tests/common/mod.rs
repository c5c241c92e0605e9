#![allow(dead_code)]

use std::sync::Arc;

use scribe_core::domain::{Category, Id, Post, Role, User};
use scribe_core::ports::{BaseRepository, TokenDenylist, TokenService};
use scribe_core::services::{
    AccountService, CategoryService, CommentService, NewComment, PostDraft, PostService,
};
use scribe_infra::{
    Argon2PasswordService, InMemoryStore, InMemoryTokenDenylist, JwtConfig, JwtTokenService,
};

/// Every service wired over one in-memory store.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub tokens: Arc<JwtTokenService>,
    pub denylist: Arc<InMemoryTokenDenylist>,
    pub accounts: AccountService,
    pub categories: CategoryService,
    pub posts: PostService,
    pub comments: CommentService,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "integration-secret".to_string(),
            expiration_hours: 1,
            issuer: "scribe-api".to_string(),
        }));
        let denylist = Arc::new(InMemoryTokenDenylist::new());

        let accounts = AccountService::new(
            store.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone() as Arc<dyn TokenService>,
            denylist.clone() as Arc<dyn TokenDenylist>,
        );
        let categories = CategoryService::new(store.clone());
        let posts = PostService::new(store.clone(), store.clone(), store.clone());
        let comments = CommentService::new(store.clone(), store.clone(), store.clone());

        Self {
            store,
            tokens,
            denylist,
            accounts,
            categories,
            posts,
            comments,
        }
    }

    /// Insert a user directly, bypassing password hashing.
    pub async fn user(&self, name: &str, role: Role) -> User {
        let user = User::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "unused-hash".to_string(),
            "0123456789".to_string(),
            role,
        );
        BaseRepository::<User, Id>::save(self.store.as_ref(), user)
            .await
            .unwrap()
    }

    pub async fn category(&self, name: &str) -> Category {
        BaseRepository::<Category, Id>::save(self.store.as_ref(), Category::new(name.to_string()))
            .await
            .unwrap()
    }

    pub async fn draft(&self, author_id: Id) -> Post {
        self.posts
            .create_post(draft_for(author_id), author_id)
            .await
            .unwrap()
    }

    pub async fn published(&self, author_id: Id) -> Post {
        let post = self.draft(author_id).await;
        self.posts
            .publish_post(post.id, author_id, author_id)
            .await
            .unwrap()
    }

    pub async fn stored_post(&self, post_id: Id) -> Option<Post> {
        BaseRepository::<Post, Id>::find_by_id(self.store.as_ref(), post_id)
            .await
            .unwrap()
    }
}

pub fn draft_for(author_id: Id) -> PostDraft {
    PostDraft {
        title: "Ownership in practice".to_string(),
        content: "Borrowing rules, explained with examples.".to_string(),
        author_id,
        category_id: None,
        featured: false,
    }
}

pub fn comment_on(post_id: Id, author_id: Id, parent_id: Option<Id>) -> NewComment {
    NewComment {
        content: "Nice write-up".to_string(),
        author_id,
        post_id,
        parent_id,
    }
}
