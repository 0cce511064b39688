//! Blog API endpoints
//!
//! Handles HTTP requests for the blog catalog:
//! - GET /api/blogs - List blogs with owners expanded (public)
//! - POST /api/blogs - Create a blog (requires auth)
//! - PUT /api/blogs/{id} - Update a blog (public)
//! - DELETE /api/blogs/{id} - Delete a blog (owner only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{Blog, BlogWithOwner, CreateBlogInput, UpdateBlogInput, User};

/// Response for a single blog
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogResponse {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// Minimal view of the owning user, present where the operation
    /// resolved it (listing, creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerResponse>,
}

/// Minimal owner view embedded in blog responses
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: None,
        }
    }
}

impl From<BlogWithOwner> for BlogResponse {
    fn from(entry: BlogWithOwner) -> Self {
        let mut response = BlogResponse::from(entry.blog);
        response.user = Some(OwnerResponse {
            id: entry.owner.id,
            username: entry.owner.username,
            name: entry.owner.name,
        });
        response
    }
}

impl BlogResponse {
    fn with_owner(mut self, owner: &User) -> Self {
        self.user = Some(OwnerResponse {
            id: owner.id,
            username: owner.username.clone(),
            name: owner.name.clone(),
        });
        self
    }
}

/// GET /api/blogs - List all blogs with their owners
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, ApiError> {
    let blogs = state.blog_service.list().await?;

    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// POST /api/blogs - Create a blog owned by the authenticated caller
pub async fn create_blog(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(input): Json<CreateBlogInput>,
) -> Result<(StatusCode, Json<BlogResponse>), ApiError> {
    let blog = state.blog_service.create(input, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(BlogResponse::from(blog).with_owner(&user)),
    ))
}

/// PUT /api/blogs/{id} - Replace the provided fields on a blog
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateBlogInput>,
) -> Result<Json<BlogResponse>, ApiError> {
    let blog = state.blog_service.update(&id, patch).await?;

    Ok(Json(blog.into()))
}

/// DELETE /api/blogs/{id} - Delete a blog as its owner
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.blog_service.delete(&id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSummary;
    use chrono::Utc;

    fn sample_blog() -> Blog {
        Blog {
            id: 7,
            title: "TestTitle".to_string(),
            author: Some("Test Author".to_string()),
            url: "https://example.com".to_string(),
            likes: 5,
            owner_id: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_from_blog_omits_user() {
        let response = BlogResponse::from(sample_blog());

        assert_eq!(response.id, 7);
        assert_eq!(response.likes, 5);
        assert!(response.user.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("user").is_none(), "absent owner is not serialized");
    }

    #[test]
    fn test_response_from_blog_with_owner() {
        let entry = BlogWithOwner {
            blog: sample_blog(),
            owner: UserSummary {
                id: 3,
                username: "mluukkai".to_string(),
                name: Some("Matti Luukkainen".to_string()),
            },
        };

        let response = BlogResponse::from(entry);
        let user = response.user.expect("owner should be embedded");

        assert_eq!(user.id, 3);
        assert_eq!(user.username, "mluukkai");
    }

    #[test]
    fn test_response_never_exposes_timestamps_or_hashes() {
        let json = serde_json::to_value(BlogResponse::from(sample_blog())).unwrap();

        assert!(json.get("created_at").is_none());
        assert!(json.get("updated_at").is_none());
        assert!(json.get("owner_id").is_none());
    }
}
