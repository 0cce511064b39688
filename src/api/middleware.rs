//! API middleware
//!
//! Contains the shared application state, the authentication middleware
//! that resolves a bearer token into an acting user, and the single place
//! where service failures are mapped to HTTP status codes and error bodies.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::User;
use crate::services::blog::{BlogService, BlogServiceError};
use crate::services::user::{UserService, UserServiceError};

/// Fixed message for every authentication failure: missing header,
/// malformed scheme, bad signature, expired token, or a token naming a
/// user that no longer exists. Callers cannot tell which.
pub const AUTH_ERROR_MESSAGE: &str = "token missing or invalid";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub blog_service: Arc<BlogService>,
    pub user_service: Arc<UserService>,
}

/// Authenticated user resolved by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(ApiError::authentication)
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// 400 with the validator's field + reason message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// 400 for a malformed or non-existent identifier
    pub fn bad_id() -> Self {
        Self::new("BAD_ID", "bad id")
    }

    /// 401 with the fixed authentication message
    pub fn authentication() -> Self {
        Self::new("AUTHENTICATION_ERROR", AUTH_ERROR_MESSAGE)
    }

    /// 403 for an authenticated but unpermitted caller
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    /// 500 with a generic body; the cause is logged, never surfaced
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "VALIDATION_ERROR" | "BAD_ID" => StatusCode::BAD_REQUEST,
            "AUTHENTICATION_ERROR" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<BlogServiceError> for ApiError {
    fn from(err: BlogServiceError) -> Self {
        match err {
            BlogServiceError::Validation(e) => ApiError::validation(e.to_string()),
            // Internally distinct, externally collapsed
            BlogServiceError::MalformedId | BlogServiceError::NotFound => ApiError::bad_id(),
            BlogServiceError::NotOwner => {
                ApiError::forbidden("only the owner may delete a blog")
            }
            BlogServiceError::Internal(e) => {
                tracing::error!(error = ?e, "Blog operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(e) => ApiError::validation(e.to_string()),
            UserServiceError::InvalidCredentials => {
                ApiError::new("AUTHENTICATION_ERROR", "invalid username or password")
            }
            UserServiceError::InvalidToken => ApiError::authentication(),
            UserServiceError::CorruptCredential(e) => {
                tracing::error!(error = ?e, "Stored credential is unusable");
                ApiError::internal()
            }
            UserServiceError::Internal(e) => {
                tracing::error!(error = ?e, "User operation failed");
                ApiError::internal()
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request.headers().get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(str::to_string)
}

/// Authentication middleware
///
/// Resolves the request's bearer token to a live user and stores it in the
/// request extensions for the `AuthenticatedUser` extractor. Every failure
/// short of a store error collapses to the same 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request).ok_or_else(ApiError::authentication)?;

    let user = state.user_service.validate_token(&token).await?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}
