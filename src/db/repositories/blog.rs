//! Blog repository
//!
//! Database operations for catalogued blogs.
//!
//! This module provides:
//! - `BlogRepository` trait defining the interface for blog data access
//! - `SqlxBlogRepository` implementing the trait for SQLite

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::{Blog, BlogWithOwner, UserSummary};

/// Blog repository trait
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Create a new blog
    async fn create(&self, blog: &Blog) -> Result<Blog>;

    /// Get blog by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Blog>>;

    /// Update a blog
    async fn update(&self, blog: &Blog) -> Result<Blog>;

    /// Delete a blog
    async fn delete(&self, id: i64) -> Result<()>;

    /// List all blogs with their owners, in insertion order
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>>;

    /// List all blogs owned by a user, in insertion order
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Blog>>;
}

/// SQLx-based blog repository implementation
pub struct SqlxBlogRepository {
    pool: SqlitePool,
}

impl SqlxBlogRepository {
    /// Create a new SQLx blog repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, blog: &Blog) -> Result<Blog> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO blogs (title, author, url, likes, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(blog.owner_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create blog")?;

        let id = result.last_insert_rowid();

        Ok(Blog {
            id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            owner_id: blog.owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Blog>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, owner_id, created_at, updated_at
            FROM blogs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get blog by ID")?;

        Ok(row.map(|row| row_to_blog(&row)))
    }

    async fn update(&self, blog: &Blog) -> Result<Blog> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE blogs
            SET title = ?, author = ?, url = ?, likes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(now)
        .bind(blog.id)
        .execute(&self.pool)
        .await
        .context("Failed to update blog")?;

        // Return the updated blog
        self.get_by_id(blog.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Blog not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete blog")?;

        Ok(())
    }

    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.owner_id, b.created_at, b.updated_at,
                   u.id AS owner_user_id, u.username AS owner_username, u.name AS owner_name
            FROM blogs b
            INNER JOIN users u ON u.id = b.owner_id
            ORDER BY b.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list blogs with owners")?;

        let mut blogs = Vec::new();
        for row in rows {
            blogs.push(BlogWithOwner {
                blog: row_to_blog(&row),
                owner: UserSummary {
                    id: row.get("owner_user_id"),
                    username: row.get("owner_username"),
                    name: row.get("owner_name"),
                },
            });
        }

        Ok(blogs)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Blog>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, owner_id, created_at, updated_at
            FROM blogs
            WHERE owner_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list blogs by owner")?;

        Ok(rows.iter().map(row_to_blog).collect())
    }
}

fn row_to_blog(row: &sqlx::sqlite::SqliteRow) -> Blog {
    Blog {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        url: row.get("url"),
        likes: row.get("likes"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
