//! Reaction handlers

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_core::entities::ReactionKind;
use pulse_service::{ReactionService, ReactionToggleResponse};

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Toggle a reaction on a post
///
/// PUT /posts/{post_id}/reactions/{kind}
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((post_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;
    let kind = ReactionKind::parse(&kind)
        .ok_or_else(|| ApiError::invalid_path("Unknown reaction kind"))?;

    let service = ReactionService::new(state.service_context());
    let response = service.toggle_reaction(post_id, auth.user_id, kind).await?;
    Ok(Json(response))
}
