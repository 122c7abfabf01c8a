//! Reaction service
//!
//! Reactions are an idempotent toggle: reacting with a kind the user already
//! has on the post removes it, otherwise it is added. Toggling twice returns
//! to the original state.

use chrono::Utc;
use tracing::{info, instrument};

use pulse_core::entities::{Reaction, ReactionKind};
use pulse_core::Snowflake;

use crate::dto::{ReactionCountsResponse, ReactionToggleResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a reaction on a post
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionToggleResponse> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let existing = self.ctx.reaction_repo().find(post_id, user_id, kind).await?;

        let reacted = if existing.is_some() {
            self.ctx.reaction_repo().delete(post_id, user_id, kind).await?;
            false
        } else {
            let reaction = Reaction::new(post_id, user_id, kind, Utc::now());
            self.ctx.reaction_repo().create(&reaction).await?;
            true
        };

        let counts = self.ctx.reaction_repo().counts_for_post(post_id).await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            kind = %kind,
            reacted,
            "Reaction toggled"
        );

        Ok(ReactionToggleResponse {
            post_id: post_id.to_string(),
            kind: kind.as_str(),
            reacted,
            reactions: ReactionCountsResponse::from(counts),
        })
    }
}
