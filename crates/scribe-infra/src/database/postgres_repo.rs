//! PostgreSQL repository implementations.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

use scribe_core::domain::{Category, Comment, Id, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};
use scribe_core::services::mask_email;

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Published.eq(true))
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_replies(&self, parent_id: Id) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::ParentId.eq(parent_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_thread(&self, root_id: Id) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(repo_error)?;

        // Gather the subtree one level at a time inside the transaction.
        let mut doomed: HashSet<Id> = HashSet::from([root_id]);
        let mut frontier = vec![root_id];
        while !frontier.is_empty() {
            let replies = CommentEntity::find()
                .filter(comment::Column::ParentId.is_in(frontier))
                .all(&txn)
                .await
                .map_err(repo_error)?;
            frontier = replies
                .into_iter()
                .map(|reply| reply.id)
                .filter(|id| doomed.insert(*id))
                .collect();
        }

        let result = CommentEntity::delete_many()
            .filter(comment::Column::Id.is_in(doomed))
            .exec(&txn)
            .await
            .map_err(repo_error)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(repo_error)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(repo_error)?;
        tracing::debug!(root_id, removed = result.rows_affected, "comment subtree removed");
        Ok(result.rows_affected)
    }
}
