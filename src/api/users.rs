//! User API endpoints
//!
//! Handles HTTP requests for user accounts:
//! - GET /api/users - List users with their owned blogs expanded (public)
//! - POST /api/users - Register a new user (public)
//!
//! No response here ever carries the password hash; the `User` entity
//! refuses to serialize it and these DTOs never copy it out.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{BlogSummary, RegisterInput, User, UserWithBlogs};

/// Response for a single user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    /// Blogs owned by this user, in creation order
    pub blogs: Vec<OwnedBlogResponse>,
}

/// Minimal blog view embedded in user responses
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnedBlogResponse {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
}

impl From<BlogSummary> for OwnedBlogResponse {
    fn from(blog: BlogSummary) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
        }
    }
}

impl From<UserWithBlogs> for UserResponse {
    fn from(entry: UserWithBlogs) -> Self {
        Self {
            id: entry.user.id,
            username: entry.user.username,
            name: entry.user.name,
            blogs: entry.blogs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: Vec::new(),
        }
    }
}

/// GET /api/users - List all users with their owned blogs
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_with_blogs().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/users - Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.register(input).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
