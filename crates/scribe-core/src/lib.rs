//! # Scribe Core
//!
//! The domain layer of the Scribe blog backend: entities, ports, and the services
//! that enforce ownership and publication rules.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult};
