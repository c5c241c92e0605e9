//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    CategoryRepository, CommentRepository, PostRepository, TokenDenylist, TokenService,
    UserRepository,
};
use scribe_core::services::{AccountService, CategoryService, CommentService, PostService};
use scribe_infra::database::{DatabaseConfig, InMemoryStore};
use scribe_infra::{Argon2PasswordService, InMemoryTokenDenylist, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub posts: PostService,
    pub comments: CommentService,
    pub categories: CategoryService,
    pub tokens: Arc<dyn TokenService>,
    pub denylist: Arc<dyn TokenDenylist>,
}

/// One repository per aggregate, all backed by the same store.
struct Repositories {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            categories: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig) -> Result<Self, scribe_infra::database::DbErr> {
        use migration::{Migrator, MigratorTrait};

        let conn = scribe_infra::database::connect(config).await?;
        Migrator::up(&conn, None).await?;
        tracing::info!("Database schema up to date");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn)),
        })
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, jwt: JwtConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repos = match db_config {
            Some(config) => match Repositories::postgres(config).await {
                Ok(repos) => repos,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                    Repositories::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let denylist: Arc<dyn TokenDenylist> = Arc::new(InMemoryTokenDenylist::new());

        let accounts = AccountService::new(
            repos.users.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
            denylist.clone(),
        );
        let posts = PostService::new(
            repos.posts.clone(),
            repos.users.clone(),
            repos.categories.clone(),
        );
        let comments = CommentService::new(repos.comments, repos.posts, repos.users);
        let categories = CategoryService::new(repos.categories);

        tracing::info!("Application state initialized");

        Self {
            accounts,
            posts,
            comments,
            categories,
            tokens,
            denylist,
        }
    }

    /// State over fresh in-memory stores, for handler tests.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        Self::new(None, JwtConfig::default()).await
    }
}
