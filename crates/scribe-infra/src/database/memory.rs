//! In-memory repositories - used when no database is configured, and by tests.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::{Category, Comment, Id, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

/// Access to the store-assigned id of an entity.
trait Keyed: Clone {
    fn key(&self) -> Id;
    fn assign_key(&mut self, id: Id);
}

macro_rules! keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn key(&self) -> Id {
                self.id
            }

            fn assign_key(&mut self, id: Id) {
                self.id = id;
            }
        })*
    };
}

keyed!(User, Category, Post, Comment);

/// One table: rows by id plus its own id sequence.
struct Table<T> {
    rows: BTreeMap<Id, T>,
    last_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Keyed> Table<T> {
    fn upsert(&mut self, mut entity: T) -> Result<T, RepoError> {
        if entity.key() == 0 {
            self.last_id += 1;
            entity.assign_key(self.last_id);
        } else if !self.rows.contains_key(&entity.key()) {
            return Err(RepoError::NotFound);
        }
        self.rows.insert(entity.key(), entity.clone());
        Ok(entity)
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    categories: Table<Category>,
    posts: Table<Post>,
    comments: Table<Comment>,
}

impl Tables {
    /// Remove every comment matching `doomed` together with all replies beneath
    /// it, mirroring the parent foreign key's cascade. Returns how many went.
    fn purge_comments(&mut self, doomed: impl Fn(&Comment) -> bool) -> u64 {
        let mut removed: HashSet<Id> = self
            .comments
            .rows
            .values()
            .filter(|c| doomed(c))
            .map(|c| c.id)
            .collect();

        loop {
            let replies: Vec<Id> = self
                .comments
                .rows
                .values()
                .filter(|c| c.parent_id.is_some_and(|p| removed.contains(&p)))
                .map(|c| c.id)
                .filter(|id| !removed.contains(id))
                .collect();
            if replies.is_empty() {
                break;
            }
            removed.extend(replies);
        }

        self.comments.rows.retain(|id, _| !removed.contains(id));
        removed.len() as u64
    }
}

/// Shared in-memory store implementing every repository port.
///
/// All tables sit behind one async `RwLock`, so each operation, cascades
/// included, is atomic with respect to the others.
/// Note: data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of comments held, across all posts.
    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.rows.len()
    }
}

#[async_trait]
impl BaseRepository<User, Id> for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.rows.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .rows
            .values()
            .any(|u| u.id != user.id && u.email == user.email);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.users.upsert(user)
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.rows.remove(&id).ok_or(RepoError::NotFound)?;

        let posts: HashSet<Id> = tables
            .posts
            .rows
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.rows.retain(|post_id, _| !posts.contains(post_id));
        tables.purge_comments(|c| c.author_id == id || posts.contains(&c.post_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Category, Id> for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.rows.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .categories
            .rows
            .values()
            .any(|c| c.id != category.id && c.name == category.name);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.categories.upsert(category)
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .categories
            .rows
            .remove(&id)
            .ok_or(RepoError::NotFound)?;

        for post in tables.posts.rows.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .rows
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.rows.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl BaseRepository<Post, Id> for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.rows.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.tables.write().await.posts.upsert(post)
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.rows.remove(&id).ok_or(RepoError::NotFound)?;
        tables.purge_comments(|c| c.post_id == id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.rows.values().cloned().collect())
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .rows
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Comment, Id> for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.rows.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.tables.write().await.comments.upsert(comment)
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        self.delete_thread(id).await.map(|_| ())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_replies(&self, parent_id: Id) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .rows
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn delete_thread(&self, root_id: Id) -> Result<u64, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.comments.rows.contains_key(&root_id) {
            return Err(RepoError::NotFound);
        }
        Ok(tables.purge_comments(|c| c.id == root_id))
    }
}
