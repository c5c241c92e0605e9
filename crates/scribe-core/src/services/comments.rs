//! Comment threads: creation against published posts, edits, and subtree deletion.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{Comment, CommentThread, Id};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CommentRepository, PostRepository, UserRepository};
use crate::services::guard;

/// A comment as submitted by its author.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub author_id: Id,
    pub post_id: Id,
    pub parent_id: Option<Id>,
}

/// Comment thread manager.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    /// Returns the stored comment together with its author's name.
    pub async fn create_comment(&self, new: NewComment, actor: Id) -> DomainResult<CommentThread> {
        guard::verify_ownership(actor, new.author_id)?;

        let author = self
            .users
            .find_by_id(new.author_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        let post = self
            .posts
            .find_by_id(new.post_id)
            .await?
            .ok_or(DomainError::PostNotFound)?;

        // FIXME: this reuses the post-ownership rule, so only a post's own author can
        // comment on it. Kept until product confirms whether other readers may comment.
        guard::verify_entity_owner(post.author_id, new.author_id)?;

        if !post.published {
            return Err(DomainError::PostNotPublished);
        }

        if let Some(parent_id) = new.parent_id {
            let parent = self
                .comments
                .find_by_id(parent_id)
                .await?
                .ok_or(DomainError::ParentCommentNotFound)?;
            if parent.post_id != new.post_id {
                return Err(DomainError::ParentCommentNotBelongsToPost);
            }
        }

        let comment = Comment::new(new.post_id, new.author_id, new.parent_id, new.content);
        let comment = self.comments.save(comment).await?;

        tracing::info!(
            comment_id = comment.id,
            post_id = comment.post_id,
            parent_id = ?comment.parent_id,
            "comment created"
        );
        Ok(CommentThread::leaf(comment, Some(author.full_name)))
    }

    pub async fn edit_comment(
        &self,
        comment_id: Id,
        content: String,
        author_id: Id,
        actor: Id,
    ) -> DomainResult<CommentThread> {
        guard::verify_ownership(actor, author_id)?;

        let mut comment = self.load(comment_id).await?;
        guard::verify_entity_owner(comment.author_id, actor)?;

        comment.edit(content);
        let comment = self.comments.save(comment).await?;

        tracing::info!(comment_id, "comment edited");
        let author_name = self.author_name(comment.author_id).await?;
        Ok(CommentThread::leaf(comment, author_name))
    }

    /// Delete a comment together with all of its replies. Returns how many
    /// comments were removed.
    pub async fn delete_comment(&self, comment_id: Id, author_id: Id, actor: Id) -> DomainResult<u64> {
        guard::verify_ownership(actor, author_id)?;

        let comment = self.load(comment_id).await?;
        guard::verify_entity_owner(comment.author_id, actor)?;

        let removed = self.comments.delete_thread(comment_id).await?;
        tracing::info!(comment_id, removed, "comment thread deleted by author");
        Ok(removed)
    }

    /// Delete any comment thread. Restricted to administrators by the caller.
    pub async fn admin_delete_comment(&self, comment_id: Id) -> DomainResult<u64> {
        self.load(comment_id).await?;

        let removed = self.comments.delete_thread(comment_id).await?;
        tracing::info!(comment_id, removed, "comment thread deleted by admin");
        Ok(removed)
    }

    /// Load a comment and its whole reply subtree.
    pub async fn comment_thread(&self, comment_id: Id) -> DomainResult<CommentThread> {
        let root = self.load(comment_id).await?;

        let mut seen = HashSet::from([root.id]);
        let mut children: HashMap<Id, Vec<Comment>> = HashMap::new();
        let mut frontier = vec![root.id];
        while let Some(parent_id) = frontier.pop() {
            let mut replies = self.comments.find_replies(parent_id).await?;
            // Each comment is visited once, even if the store hands back a cycle.
            replies.retain(|reply| seen.insert(reply.id));
            frontier.extend(replies.iter().map(|reply| reply.id));
            children.insert(parent_id, replies);
        }

        let mut names = HashMap::new();
        let author_ids: HashSet<Id> = std::iter::once(root.author_id)
            .chain(children.values().flatten().map(|c| c.author_id))
            .collect();
        for author_id in author_ids {
            names.insert(author_id, self.author_name(author_id).await?);
        }

        tracing::debug!(comment_id, size = seen.len(), "comment thread loaded");
        Ok(assemble(root, &mut children, &names))
    }

    async fn author_name(&self, author_id: Id) -> DomainResult<Option<String>> {
        Ok(self
            .users
            .find_by_id(author_id)
            .await?
            .map(|user| user.full_name))
    }

    async fn load(&self, comment_id: Id) -> DomainResult<Comment> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound)
    }
}

fn assemble(
    comment: Comment,
    children: &mut HashMap<Id, Vec<Comment>>,
    names: &HashMap<Id, Option<String>>,
) -> CommentThread {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| assemble(reply, children, names))
        .collect();

    CommentThread {
        author_name: names.get(&comment.author_id).cloned().flatten(),
        comment,
        replies,
    }
}
