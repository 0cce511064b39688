//! API layer - HTTP handlers and routing
//!
//! This module contains the HTTP surface of the blog catalog:
//! - Blog endpoints (list, create, update, delete)
//! - User endpoints (register, list)
//! - Login endpoint (credentials to bearer token)
//! - Authentication middleware and the error-body mapping
//!
//! Routing is split into a public group and a protected group; only the
//! protected group runs the `require_auth` middleware.

pub mod blogs;
pub mod login;
pub mod middleware;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Mutations that name an acting user
    let protected_routes = Router::new()
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs/{id}", delete(blogs::delete_blog))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/{id}", put(blogs::update_blog))
        .route("/users", get(users::list_users))
        .route("/users", post(users::register))
        .route("/login", post(login::login))
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS configuration from the configured origin; "*" allows any origin
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            tracing::warn!(origin, "Invalid CORS origin in configuration, allowing any");
            cors.allow_origin(Any)
        }
    }
}
