//! Feed query extractor
//!
//! Extracts mode, cursor, and page size from the feed query string. An
//! unknown mode is rejected up front; the cursor is passed through opaque
//! (lenient decoding happens in the service).

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use pulse_core::ranking::FeedMode;
use serde::Deserialize;

use crate::response::ApiError;

/// Feed query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct FeedQuery {
    /// Feed mode: "for_you" or "following"
    pub mode: FeedMode,
    /// Opaque pagination cursor from a previous page
    #[serde(default)]
    pub cursor: Option<String>,
    /// Requested page size; validated against configured bounds downstream
    #[serde(default)]
    pub limit: Option<i64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for FeedQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<FeedQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(query)
    }
}
