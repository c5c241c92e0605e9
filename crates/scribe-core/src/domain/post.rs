use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::error::{DomainError, DomainResult};

/// Observable publication state of a post, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostState {
    /// Never published, or edited since the last publish.
    Draft,
    Published,
    /// Taken down after being published. Not a draft: unpublishing keeps `draft == false`.
    Unpublished,
}

/// Post entity - a blog post owned by its author.
///
/// `published` and `draft` are never both true, and `published_at` is set
/// exactly when `published` is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub author_id: Id,
    pub category_id: Option<Id>,
    pub title: String,
    pub content: String,
    pub featured: bool,
    pub draft: bool,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new draft post.
    pub fn new(
        author_id: Id,
        title: String,
        content: String,
        category_id: Option<Id>,
        featured: bool,
    ) -> Self {
        Self {
            id: 0,
            author_id,
            category_id,
            title,
            content,
            featured,
            draft: true,
            published: false,
            published_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn state(&self) -> PostState {
        match (self.draft, self.published) {
            (_, true) => PostState::Published,
            (true, false) => PostState::Draft,
            (false, false) => PostState::Unpublished,
        }
    }

    /// Overwrite the editable fields. Any edit sends the post back to draft;
    /// it has to be published again deliberately.
    pub fn revise(
        &mut self,
        title: String,
        content: String,
        category_id: Option<Id>,
        featured: bool,
    ) {
        self.title = title;
        self.content = content;
        self.category_id = category_id;
        self.featured = featured;
        self.updated_at = Some(Utc::now());
        self.draft = true;
        self.published = false;
        self.published_at = None;
    }

    pub fn publish(&mut self) -> DomainResult<()> {
        if self.published {
            return Err(DomainError::PostAlreadyPublished);
        }
        self.published = true;
        self.draft = false;
        self.published_at = Some(Utc::now());
        Ok(())
    }

    /// Take the post down. The draft flag is left as it is.
    pub fn unpublish(&mut self) -> DomainResult<()> {
        if !self.published {
            return Err(DomainError::PostAlreadyUnpublished);
        }
        self.published = false;
        self.published_at = None;
        Ok(())
    }
}
