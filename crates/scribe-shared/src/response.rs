//! Standardized API response types.

use serde::{Deserialize, Serialize};

/// Error envelope returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status: u16,

    /// Short reason phrase for the status, e.g. "Conflict".
    pub error: String,

    /// Human-readable explanation specific to this occurrence.
    pub message: String,

    /// Field-level messages; only filled for validation failures.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized", message)
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden", "Authorization failed")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "Conflict", message)
    }

    pub fn internal_error() -> Self {
        Self::new(
            500,
            "Internal Server Error",
            "An unexpected error occurred. Please try again later.",
        )
    }
}

/// Plain confirmation message, e.g. for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ErrorResponse::bad_request("Validation failed")
            .with_errors(vec!["Title cannot be blank".to_string()]);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["errors"][0], "Title cannot be blank");
    }
}
