//! # Scribe Shared
//!
//! Wire types shared by the API server and its clients: request/response DTOs,
//! the error envelope, and request-format validation.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorResponse, MessageResponse};
pub use validation::Validate;
