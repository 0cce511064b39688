//! Bloglist - a multi-user blog catalog service

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloglist::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxBlogRepository, SqlxUserRepository},
    },
    services::{blog::BlogService, token::TokenSigner, user::UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloglist=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting bloglist service...");

    // Load configuration; an optional CLI argument overrides the file path
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yml"));
    let config = Config::load_with_env(&config_path)?;
    config.validate()?;
    tracing::info!("Configuration loaded from {}", config_path.display());

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    let applied = db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed ({} applied)", applied);

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let blog_repo = SqlxBlogRepository::boxed(pool);

    // The signing secret is read exactly once, here
    let token_signer = Arc::new(TokenSigner::new(&config.auth.token_secret));

    // Initialize services
    let user_service = Arc::new(UserService::new(
        user_repo,
        blog_repo.clone(),
        token_signer,
    ));
    let blog_service = Arc::new(BlogService::new(blog_repo));

    // Build application state and router
    let state = AppState {
        blog_service,
        user_service,
    };
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
