//! Authentication implementations.

mod denylist;
mod jwt;
mod password;

pub use denylist::InMemoryTokenDenylist;
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
