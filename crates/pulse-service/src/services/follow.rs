//! Follow service

use chrono::Utc;
use tracing::{info, instrument};

use pulse_core::entities::Follow;
use pulse_core::{DomainError, Snowflake};

use crate::dto::FollowResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow a user (no-op if already following)
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        if follower_id == followee_id {
            return Err(ServiceError::Domain(DomainError::CannotFollowSelf));
        }

        self.ctx
            .user_repo()
            .find_by_id(followee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", followee_id.to_string()))?;

        let follow = Follow::new(follower_id, followee_id, Utc::now());
        self.ctx.follow_repo().create(&follow).await?;

        info!(follower_id = %follower_id, followee_id = %followee_id, "Follow created");

        Ok(FollowResponse {
            user_id: followee_id.to_string(),
            following: true,
        })
    }

    /// Unfollow a user (no-op if not following)
    #[instrument(skip(self))]
    pub async fn unfollow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        self.ctx.follow_repo().delete(follower_id, followee_id).await?;

        info!(follower_id = %follower_id, followee_id = %followee_id, "Follow removed");

        Ok(FollowResponse {
            user_id: followee_id.to_string(),
            following: false,
        })
    }
}
