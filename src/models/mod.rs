//! Data models
//!
//! This module contains the entities of the blog catalog and their
//! submitted-input counterparts:
//! - Database entities (Blog, User)
//! - Input types carrying the entity validators
//! - Reduced views used by list expansions (owner and blog summaries)

mod blog;
mod user;
mod validation;

pub use blog::{Blog, BlogSummary, BlogWithOwner, CreateBlogInput, UpdateBlogInput};
pub use user::{RegisterInput, User, UserSummary, UserWithBlogs, MIN_CREDENTIAL_CHARS};
pub use validation::ValidationError;
