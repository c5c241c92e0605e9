use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Capability granted to an account. Checked at the HTTP boundary, independently
/// of resource ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Read,
    Write,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Read => "READ",
            Role::Write => "WRITE",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role name is not one of READ, WRITE or ADMIN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READ" => Ok(Role::Read),
            "WRITE" => Ok(Role::Write),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// User entity - an account that can author posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub role: Role,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet persisted user.
    pub fn new(
        full_name: String,
        email: String,
        password_hash: String,
        mobile_number: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            full_name,
            email,
            password_hash,
            mobile_number,
            role,
            bio: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_case_insensitively() {
        assert_eq!("write".parse::<Role>().unwrap(), Role::Write);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Read).unwrap(), "\"READ\"");
    }
}
