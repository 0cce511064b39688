//! User service
//!
//! Business logic for user accounts:
//! - Registration with username uniqueness and credential policy
//! - Login, exchanging credentials for a bearer token
//! - Token validation, resolving a bearer token to a live user
//! - User listing with owned-blog summaries

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::db::repositories::{BlogRepository, UserRepository};
use crate::models::{BlogSummary, RegisterInput, User, UserWithBlogs, ValidationError};
use crate::services::password::{hash_password, verify_password, PasswordError};
use crate::services::token::TokenSigner;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Input failed a structural or uniqueness rule
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown username or wrong password; callers cannot tell which
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A stored credential could not be used for verification
    #[error("stored credential is unusable: {0}")]
    CorruptCredential(PasswordError),

    /// Bearer token missing, malformed, expired, or naming no live user
    #[error("token missing or invalid")]
    InvalidToken,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// User service for registration, login, and token resolution
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    token_signer: Arc<TokenSigner>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        token_signer: Arc<TokenSigner>,
    ) -> Self {
        Self {
            user_repo,
            blog_repo,
            token_signer,
        }
    }

    /// Register a new user
    ///
    /// Validates the input, hashes the password, and persists the user.
    /// The username pre-check is only a fast path: a concurrent
    /// registration racing past it is still caught by the storage UNIQUE
    /// constraint and reported as the same validation failure.
    ///
    /// # Errors
    ///
    /// - `Validation` if the username or password is too short, or the
    ///   username is already taken
    /// - `Internal` for database errors
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        input.validate()?;

        if self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(ValidationError::new("username", "must be unique").into());
        }

        let password_hash = match hash_password(&input.password) {
            Ok(hash) => hash,
            Err(PasswordError::TooShort) => {
                return Err(ValidationError::new("password", "must be at least 3 characters").into())
            }
            Err(err) => return Err(UserServiceError::Internal(anyhow::Error::new(err))),
        };

        let user = User::new(input.username, input.name, password_hash);

        match self.user_repo.create(&user).await {
            Ok(created) => Ok(created),
            Err(err) if is_unique_violation(&err) => {
                Err(ValidationError::new("username", "must be unique").into())
            }
            Err(err) => Err(UserServiceError::Internal(err)),
        }
    }

    /// Login with credentials, returning the user and a bearer token
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the username is unknown or the password is
    ///   wrong; the two cases are indistinguishable
    /// - `CorruptCredential` if the stored hash cannot be verified
    /// - `Internal` for database or signing errors
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, String), UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to look up user")?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let password_valid = match verify_password(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(err) => return Err(UserServiceError::CorruptCredential(err)),
        };

        if !password_valid {
            return Err(UserServiceError::InvalidCredentials);
        }

        let token = self
            .token_signer
            .issue(user.id, &user.username)
            .context("Failed to issue token")?;

        Ok((user, token))
    }

    /// Resolve a bearer token to the user it names
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if verification fails for any reason, or the user
    ///   named by the token no longer exists
    /// - `Internal` for database errors
    pub async fn validate_token(&self, token: &str) -> Result<User, UserServiceError> {
        let claims = self
            .token_signer
            .verify(token)
            .map_err(|_| UserServiceError::InvalidToken)?;

        self.user_repo
            .get_by_id(claims.uid)
            .await
            .context("Failed to resolve token user")?
            .ok_or(UserServiceError::InvalidToken)
    }

    /// List all users, each with summaries of the blogs they own
    ///
    /// # Errors
    ///
    /// - `Internal` for database errors
    pub async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserServiceError> {
        let users = self.user_repo.list().await.context("Failed to list users")?;

        let mut result = Vec::with_capacity(users.len());
        for user in users {
            let blogs = self
                .blog_repo
                .list_by_owner(user.id)
                .await
                .context("Failed to list owned blogs")?;

            result.push(UserWithBlogs {
                user,
                blogs: blogs.into_iter().map(BlogSummary::from).collect(),
            });
        }

        Ok(result)
    }
}

/// Whether any error in the chain is a storage unique-constraint violation
fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .any(|e| matches!(e, sqlx::Error::Database(db) if db.is_unique_violation()))
}
