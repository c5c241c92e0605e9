use async_trait::async_trait;

use crate::domain::{Category, Comment, Id, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity. An unsaved entity (id `0`) is inserted and gets its id assigned.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Id> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository. Deleting a category clears it from the posts filed under it.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Id> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;
}

/// Post repository. Deleting a post removes its comments with it.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Id> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Id> {
    /// Direct replies to a comment, oldest first.
    async fn find_replies(&self, parent_id: Id) -> Result<Vec<Comment>, RepoError>;

    /// Delete a comment and every descendant reply atomically: either the whole
    /// subtree goes or nothing does. Returns the number of comments removed.
    async fn delete_thread(&self, root_id: Id) -> Result<u64, RepoError>;
}
