//! Domain entities - the core business objects.
//!
//! Entities reference each other by id only; relationships are resolved through
//! the repository ports.

mod category;
mod comment;
mod post;
mod user;

pub use category::Category;
pub use comment::{Comment, CommentThread};
pub use post::{Post, PostState};
pub use user::{Role, UnknownRole, User};

/// Store-assigned identifier. `0` marks an entity that has not been saved yet.
pub type Id = i64;
