//! Blog model
//!
//! This module provides:
//! - `Blog` entity representing a catalog entry
//! - Input types for creating and updating blogs, with their validation
//! - `BlogSummary` and `BlogWithOwner` views used by list expansions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;
use super::validation::ValidationError;

/// Blog entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Unique identifier
    pub id: i64,
    /// Blog title
    pub title: String,
    /// Author display text (free-form, not a user reference)
    pub author: Option<String>,
    /// Blog URL
    pub url: String,
    /// Like count, never negative
    #[serde(default)]
    pub likes: i64,
    /// Owning user's id; set at creation, never re-parented
    pub owner_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog with the given parameters
    pub fn new(
        title: String,
        author: Option<String>,
        url: String,
        likes: i64,
        owner_id: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            title,
            author,
            url,
            likes,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Minimal blog view used when expanding a user's owned blogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSummary {
    /// Blog id
    pub id: i64,
    /// Blog title
    pub title: String,
    /// Author display text
    pub author: Option<String>,
    /// Blog URL
    pub url: String,
}

impl From<Blog> for BlogSummary {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
        }
    }
}

/// Blog joined with a minimal view of its owner, as produced by blog listing
#[derive(Debug, Clone)]
pub struct BlogWithOwner {
    /// The blog itself
    pub blog: Blog,
    /// Minimal view of the owning user
    pub owner: UserSummary,
}

/// Input for creating a new blog.
///
/// `title` and `url` are optional here so that their absence surfaces as a
/// validation failure rather than a deserialization error; `validate`
/// enforces presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogInput {
    /// Blog title (required by validation)
    pub title: Option<String>,
    /// Author display text
    pub author: Option<String>,
    /// Blog URL (required by validation)
    pub url: Option<String>,
    /// Like count; absent means 0
    pub likes: Option<i64>,
}

impl CreateBlogInput {
    /// Create an input with the required fields set
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: None,
            url: Some(url.into()),
            likes: None,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the like count
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }

    /// Check the structural rules for a new blog: `title` and `url` must be
    /// present and non-empty; `likes`, when given, must be non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::new("title", "is required"));
        }
        if self.url.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::new("url", "is required"));
        }
        if self.likes.is_some_and(|likes| likes < 0) {
            return Err(ValidationError::new("likes", "must be non-negative"));
        }
        Ok(())
    }

    /// Like count with the absent-means-zero rule applied.
    ///
    /// This is the single place the default is materialized; callers apply
    /// it once, after `validate`, and never again.
    pub fn likes_or_default(&self) -> i64 {
        self.likes.unwrap_or(0)
    }
}

/// Input for updating an existing blog.
///
/// Absent fields are left unchanged; present fields replace the stored
/// values. An absent `likes` here means "keep", never "reset to 0".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogInput {
    /// New title (optional)
    pub title: Option<String>,
    /// New author display text (optional)
    pub author: Option<String>,
    /// New URL (optional)
    pub url: Option<String>,
    /// New like count (optional)
    pub likes: Option<i64>,
}

impl UpdateBlogInput {
    /// Create a new empty UpdateBlogInput
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the like count
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }

    /// Check that the patch cannot break a stored blog's invariants:
    /// a provided `title`/`url` must be non-empty, a provided `likes`
    /// non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::new("title", "is required"));
        }
        if self.url.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::new("url", "is required"));
        }
        if self.likes.is_some_and(|likes| likes < 0) {
            return Err(ValidationError::new("likes", "must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_new() {
        let blog = Blog::new(
            "TestTitle".to_string(),
            Some("Test Author".to_string()),
            "example.com".to_string(),
            15,
            1,
        );

        assert_eq!(blog.id, 0);
        assert_eq!(blog.title, "TestTitle");
        assert_eq!(blog.author.as_deref(), Some("Test Author"));
        assert_eq!(blog.url, "example.com");
        assert_eq!(blog.likes, 15);
        assert_eq!(blog.owner_id, 1);
    }

    #[test]
    fn test_create_input_valid() {
        let input = CreateBlogInput::new("TestTitle", "example.com");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_input_missing_title() {
        let input = CreateBlogInput {
            title: None,
            author: None,
            url: Some("example.com".to_string()),
            likes: None,
        };

        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_create_input_empty_title() {
        let input = CreateBlogInput::new("", "example.com");

        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_create_input_missing_url() {
        let input = CreateBlogInput {
            title: Some("TestTitle".to_string()),
            author: None,
            url: None,
            likes: None,
        };

        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "url");
        assert_eq!(err.to_string(), "url is required");
    }

    #[test]
    fn test_create_input_negative_likes() {
        let input = CreateBlogInput::new("TestTitle", "example.com").with_likes(-1);

        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "likes must be non-negative");
    }

    #[test]
    fn test_create_input_likes_default() {
        let input = CreateBlogInput::new("TestTitle", "example.com");
        assert!(input.validate().is_ok());
        assert_eq!(input.likes_or_default(), 0);

        let input = input.with_likes(123);
        assert_eq!(input.likes_or_default(), 123);
    }

    #[test]
    fn test_update_input_empty_patch_is_valid() {
        assert!(UpdateBlogInput::new().validate().is_ok());
    }

    #[test]
    fn test_update_input_rejects_empty_title() {
        let patch = UpdateBlogInput::new().with_title("");

        let err = patch.validate().unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_update_input_rejects_negative_likes() {
        let patch = UpdateBlogInput::new().with_likes(-5);

        let err = patch.validate().unwrap_err();
        assert_eq!(err.field, "likes");
    }

    #[test]
    fn test_blog_summary_from_blog() {
        let mut blog = Blog::new(
            "TestTitle".to_string(),
            Some("Test Author".to_string()),
            "example.com".to_string(),
            15,
            1,
        );
        blog.id = 7;

        let summary = BlogSummary::from(blog);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.title, "TestTitle");
        assert_eq!(summary.author.as_deref(), Some("Test Author"));
        assert_eq!(summary.url, "example.com");
    }
}
