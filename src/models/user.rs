//! User model
//!
//! Defines the User entity, the registration input with its validation
//! rules, and the reduced user views used by expansions. The password hash
//! is carried on the entity but excluded from every serialization path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blog::BlogSummary;
use super::validation::ValidationError;

/// Minimum length, in characters, for both usernames and raw passwords.
pub const MIN_CREDENTIAL_CHARS: usize = 3;

/// User entity representing a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
    /// Password hash (argon2), never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password`.
    pub fn new(username: String, name: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            username,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Minimal user view used when expanding a blog's owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: i64,
    /// Username
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// User joined with summaries of the blogs they own, as produced by user
/// listing
#[derive(Debug, Clone)]
pub struct UserWithBlogs {
    /// The user itself (hash still unserializable)
    pub user: User,
    /// Blogs owned by this user, in creation order
    pub blogs: Vec<BlogSummary>,
}

/// Input for registering a new user (before password hashing)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    /// Username
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
    /// Plaintext password (will be hashed)
    pub password: String,
}

impl RegisterInput {
    /// Create a registration input
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: None,
            password: password.into(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check the structural rules for a registration: username and raw
    /// password must each be at least three characters. Uniqueness is a
    /// store-level concern and checked by the user service.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.chars().count() < MIN_CREDENTIAL_CHARS {
            return Err(ValidationError::new(
                "username",
                "must be at least 3 characters",
            ));
        }
        if self.password.chars().count() < MIN_CREDENTIAL_CHARS {
            return Err(ValidationError::new(
                "password",
                "must be at least 3 characters",
            ));
        }
        Ok(())
    }
}
