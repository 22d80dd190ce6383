use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Access roles, from widest write surface to read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Attorney,
    Paralegal,
    Viewer,
}

impl Default for Role {
    fn default() -> Self {
        Self::Attorney
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Admin => "ADMIN",
            Self::Attorney => "ATTORNEY",
            Self::Paralegal => "PARALEGAL",
            Self::Viewer => "VIEWER",
        };
        write!(f, "{label}")
    }
}

/// Shared three-level priority used by cases, diary entries, and intake urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Stored account record. The password hash never leaves the store: response
/// projections select name/email/role only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        role: Role,
        password_hash: String,
    ) -> Result<Self, crate::ValidationError> {
        crate::validation::require_nonempty("name", &name)?;
        crate::validation::require_nonempty("email", &email)?;
        crate::validation::require_nonempty("passwordHash", &password_hash)?;
        Ok(Self {
            name,
            email,
            role,
            password_hash,
        })
    }
}
