use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Comment entity - attached to one post, optionally replying to another
/// comment on the same post. `post_id` and `parent_id` never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub author_id: Id,
    pub parent_id: Option<Id>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(post_id: Id, author_id: Id, parent_id: Option<Id>, content: String) -> Self {
        Self {
            id: 0,
            post_id,
            author_id,
            parent_id,
            content,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Some(Utc::now());
    }
}

/// A comment with its reply subtree materialized.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub author_name: Option<String>,
    pub replies: Vec<CommentThread>,
}

impl CommentThread {
    /// A single comment with no replies loaded.
    pub fn leaf(comment: Comment, author_name: Option<String>) -> Self {
        Self {
            comment,
            author_name,
            replies: Vec::new(),
        }
    }

    /// Number of comments in the thread, root included.
    pub fn size(&self) -> usize {
        1 + self.replies.iter().map(CommentThread::size).sum::<usize>()
    }
}
