//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains the database adapters and the authentication services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, InMemoryTokenDenylist, JwtConfig, JwtTokenService};
