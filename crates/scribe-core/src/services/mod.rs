//! Application services. Every mutating operation passes the authorization
//! guard before it touches storage.

mod accounts;
mod categories;
mod comments;
pub mod guard;
mod posts;

pub use accounts::{
    AccountService, IssuedToken, PasswordChange, PasswordReset, ProfileUpdate, Registration,
    mask_email,
};
pub use categories::CategoryService;
pub use comments::{CommentService, NewComment};
pub use posts::{PostDraft, PostService};
