//! Authentication extractor
//!
//! Identity is established by the upstream auth gateway, which terminates
//! tokens and forwards the caller's id in the `x-user-id` header. This
//! extractor only validates the header's presence and shape.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use pulse_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the authenticated caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user forwarded by the gateway
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Caller's user ID
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::MissingAuth)?;

        let value = header.to_str().map_err(|_| ApiError::InvalidAuthFormat)?;

        let user_id = value.parse::<Snowflake>().map_err(|e| {
            tracing::warn!(error = %e, "Malformed user id header");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthUser::new(user_id))
    }
}
