//! Blog service
//!
//! Business logic for the blog catalog:
//! - Listing with owner expansion (no auth)
//! - Validated creation on behalf of an authenticated owner
//! - Patch updates addressed by id
//! - Owner-only deletion
//!
//! Id-addressed operations take the raw path segment and parse it here, so
//! a malformed id surfaces as a typed failure instead of a routing error.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::db::repositories::BlogRepository;
use crate::models::{Blog, BlogWithOwner, CreateBlogInput, UpdateBlogInput, User, ValidationError};

/// Error types for blog service operations
#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    /// Input failed a structural rule
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Supplied id is not syntactically an id.
    ///
    /// Kept separate from `NotFound` even though the boundary maps both to
    /// the same response today.
    #[error("malformed id")]
    MalformedId,

    /// Well-formed id naming no stored blog
    #[error("blog not found")]
    NotFound,

    /// Acting user is authenticated but does not own the blog
    #[error("only the owner may delete a blog")]
    NotOwner,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Blog service for catalog CRUD with ownership rules
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    /// Create a new blog service
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// List all blogs with their owners expanded, in insertion order
    ///
    /// # Errors
    ///
    /// - `Internal` for database errors
    pub async fn list(&self) -> Result<Vec<BlogWithOwner>, BlogServiceError> {
        let blogs = self
            .repo
            .list_with_owners()
            .await
            .context("Failed to list blogs")?;

        Ok(blogs)
    }

    /// Create a blog owned by the acting user
    ///
    /// The owned-blogs list is derived from `owner_id`, so the insert is
    /// the only write; there is no separate list to append to.
    ///
    /// # Errors
    ///
    /// - `Validation` if `title` or `url` is missing/empty, or `likes` is
    ///   negative
    /// - `Internal` for database errors
    pub async fn create(
        &self,
        input: CreateBlogInput,
        owner: &User,
    ) -> Result<Blog, BlogServiceError> {
        input.validate()?;

        // validate guarantees title and url are present and non-empty
        let likes = input.likes_or_default();
        let blog = Blog::new(
            input.title.unwrap_or_default(),
            input.author,
            input.url.unwrap_or_default(),
            likes,
            owner.id,
        );

        let created = self
            .repo
            .create(&blog)
            .await
            .context("Failed to create blog")?;

        Ok(created)
    }

    /// Update the blog named by `id`, replacing the fields the patch provides
    ///
    /// Absent patch fields keep their stored values; an absent `likes` is
    /// "leave unchanged", never a reset to 0.
    ///
    /// # Errors
    ///
    /// - `MalformedId` if `id` does not parse
    /// - `NotFound` if no blog has that id
    /// - `Validation` if a provided field breaks a stored invariant
    /// - `Internal` for database errors
    pub async fn update(
        &self,
        id: &str,
        patch: UpdateBlogInput,
    ) -> Result<Blog, BlogServiceError> {
        let id = parse_id(id)?;
        patch.validate()?;

        let mut blog = self
            .repo
            .get_by_id(id)
            .await
            .context("Failed to load blog")?
            .ok_or(BlogServiceError::NotFound)?;

        if let Some(title) = patch.title {
            blog.title = title;
        }
        if let Some(author) = patch.author {
            blog.author = Some(author);
        }
        if let Some(url) = patch.url {
            blog.url = url;
        }
        if let Some(likes) = patch.likes {
            blog.likes = likes;
        }

        let updated = self
            .repo
            .update(&blog)
            .await
            .context("Failed to update blog")?;

        Ok(updated)
    }

    /// Delete the blog named by `id` on behalf of the acting user
    ///
    /// Deletion is not idempotent: a second delete of the same id fails
    /// with `NotFound` rather than succeeding silently.
    ///
    /// # Errors
    ///
    /// - `MalformedId` if `id` does not parse
    /// - `NotFound` if no blog has that id
    /// - `NotOwner` if the acting user did not create the blog
    /// - `Internal` for database errors
    pub async fn delete(&self, id: &str, acting_user: &User) -> Result<(), BlogServiceError> {
        let id = parse_id(id)?;

        let blog = self
            .repo
            .get_by_id(id)
            .await
            .context("Failed to load blog")?
            .ok_or(BlogServiceError::NotFound)?;

        if blog.owner_id != acting_user.id {
            return Err(BlogServiceError::NotOwner);
        }

        self.repo
            .delete(id)
            .await
            .context("Failed to delete blog")?;

        Ok(())
    }
}

/// Parse a raw path segment into a blog id
fn parse_id(raw: &str) -> Result<i64, BlogServiceError> {
    raw.parse::<i64>().map_err(|_| BlogServiceError::MalformedId)
}
