//! Services layer - Business logic
//!
//! This module contains all business logic for the blog catalog:
//! - `blog`: CRUD over catalogued blogs, enforcing ownership on mutation
//! - `user`: registration, login, and bearer-token resolution
//! - `password` / `token`: credential management
//! - `stats`: pure aggregate statistics over a blog set

pub mod blog;
pub mod password;
pub mod stats;
pub mod token;
pub mod user;

pub use blog::{BlogService, BlogServiceError};
pub use password::{hash_password, verify_password, PasswordError};
pub use stats::{
    favourite_blog, most_blogs, most_likes, total_likes, AuthorBlogCount, AuthorLikes,
};
pub use token::{TokenError, TokenSigner, TOKEN_TTL_SECS};
pub use user::{UserService, UserServiceError};
