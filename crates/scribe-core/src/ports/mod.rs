//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenDenylist, TokenService, bearer_token};
pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};
