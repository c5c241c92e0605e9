//! Post lifecycle: creation, edits and the draft / published / unpublished cycle.
//!
//! Check order is part of the contract, since it decides which error a caller sees:
//! token guard, then entity lookup, then (for publish/unpublish) the state
//! conflict, then the owner of the loaded post.

use std::sync::Arc;

use crate::domain::{Id, Post};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CategoryRepository, PostRepository, UserRepository};
use crate::services::guard;

/// Author-supplied post fields, shared by create and update.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author_id: Id,
    pub category_id: Option<Id>,
    pub featured: bool,
}

/// Post lifecycle manager.
///
/// Saves are plain load-modify-save; two concurrent transitions on the same
/// post resolve as last write wins.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            posts,
            users,
            categories,
        }
    }

    pub async fn create_post(&self, draft: PostDraft, actor: Id) -> DomainResult<Post> {
        guard::verify_ownership(actor, draft.author_id)?;

        self.users
            .find_by_id(draft.author_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        let category_id = self.resolve_category(draft.category_id).await?;

        let post = Post::new(
            draft.author_id,
            draft.title,
            draft.content,
            category_id,
            draft.featured,
        );
        let post = self.posts.save(post).await?;

        tracing::info!(post_id = post.id, author_id = post.author_id, "post created");
        Ok(post)
    }

    pub async fn update_post(&self, post_id: Id, draft: PostDraft, actor: Id) -> DomainResult<Post> {
        guard::verify_ownership(actor, draft.author_id)?;

        let mut post = self.load(post_id).await?;
        guard::verify_entity_owner(post.author_id, draft.author_id)?;

        let category_id = self.resolve_category(draft.category_id).await?;
        post.revise(draft.title, draft.content, category_id, draft.featured);
        let post = self.posts.save(post).await?;

        tracing::info!(post_id, "post edited, back to draft");
        Ok(post)
    }

    pub async fn publish_post(&self, post_id: Id, author_id: Id, actor: Id) -> DomainResult<Post> {
        guard::verify_ownership(actor, author_id)?;

        let mut post = self.load(post_id).await?;
        // The transition runs on the loaded copy; nothing is saved unless the owner check passes too.
        post.publish()?;
        guard::verify_entity_owner(post.author_id, author_id)?;
        let post = self.posts.save(post).await?;

        tracing::info!(post_id, "post published");
        Ok(post)
    }

    pub async fn unpublish_post(
        &self,
        post_id: Id,
        author_id: Id,
        actor: Id,
    ) -> DomainResult<Post> {
        guard::verify_ownership(actor, author_id)?;

        let mut post = self.load(post_id).await?;
        post.unpublish()?;
        guard::verify_entity_owner(post.author_id, author_id)?;
        let post = self.posts.save(post).await?;

        tracing::info!(post_id, "post unpublished");
        Ok(post)
    }

    pub async fn delete_post(&self, post_id: Id, author_id: Id, actor: Id) -> DomainResult<()> {
        guard::verify_ownership(actor, author_id)?;

        let post = self.load(post_id).await?;
        guard::verify_entity_owner(post.author_id, author_id)?;
        self.posts.delete(post_id).await?;

        tracing::info!(post_id, "post deleted by author");
        Ok(())
    }

    /// Delete any post. Restricted to administrators by the caller.
    pub async fn admin_delete_post(&self, post_id: Id) -> DomainResult<()> {
        self.load(post_id).await?;
        self.posts.delete(post_id).await?;

        tracing::info!(post_id, "post deleted by admin");
        Ok(())
    }

    pub async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn list_published(&self) -> DomainResult<Vec<Post>> {
        Ok(self.posts.find_published().await?)
    }

    async fn load(&self, post_id: Id) -> DomainResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound)
    }

    /// A missing category id is legal and skips the lookup.
    async fn resolve_category(&self, category_id: Option<Id>) -> DomainResult<Option<Id>> {
        let Some(id) = category_id else {
            return Ok(None);
        };
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound)?;
        Ok(Some(category.id))
    }
}
