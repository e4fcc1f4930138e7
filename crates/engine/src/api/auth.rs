//! Caller identity for HTTP routes
//!
//! Accounts live in an external auth layer that forwards the child's ID in
//! the `X-User-Id` header.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(Auth(user_id): Auth) -> impl IntoResponse {
//!     format!("Hello, {}", user_id)
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use socialsim_domain::UserId;

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user. Missing or blank IDs are rejected
/// with 401.
#[derive(Debug, Clone)]
pub struct Auth(pub UserId);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(UserId::new)
            .map(Auth)
            .ok_or(ApiError::Unauthorized)
    }
}
