//! Database layer
//!
//! SQLite storage for the blog catalog, chosen for single-binary deployment.
//!
//! # Usage
//!
//! ```ignore
//! use bloglist::config::DatabaseConfig;
//! use bloglist::db::{create_pool, migrations};
//!
//! // Create pool from configuration
//! let config = DatabaseConfig::default();
//! let pool = create_pool(&config).await?;
//!
//! // Run migrations
//! migrations::run_migrations(&pool).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
