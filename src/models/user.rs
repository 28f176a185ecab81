//! User model
//!
//! Users scope all transaction and goal data. Each user has a unique,
//! normalized email address and an Argon2id password hash; credentials are
//! managed by the user service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Email address (trimmed, lowercased, unique)
    pub email: String,

    /// Argon2id hash of the user's password, in PHC string format
    pub password_hash: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from a normalized email and password hash
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.email, self.id)
    }
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
