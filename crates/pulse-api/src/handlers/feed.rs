//! Feed handler
//!
//! The core endpoint: personalized ranked ("for_you") and chronological
//! ("following") timelines with cursor pagination.

use axum::{extract::State, Json};
use pulse_service::{FeedResponse, FeedService};

use crate::extractors::{AuthUser, FeedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a feed page
///
/// GET /feed?mode={for_you|following}&cursor=...&limit=...
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    query: FeedQuery,
) -> ApiResult<Json<FeedResponse>> {
    let service = FeedService::new(state.service_context());
    let response = service
        .get_feed(auth.user_id, query.mode, query.cursor.as_deref(), query.limit)
        .await?;
    Ok(Json(response))
}
