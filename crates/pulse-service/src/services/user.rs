//! User service

use tracing::instrument;

use pulse_core::Snowflake;

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a public profile with follow counts
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let following_count = self.ctx.follow_repo().following_count(user_id).await?;
        let follower_count = self.ctx.follow_repo().follower_count(user_id).await?;

        Ok(UserResponse::from_user(&user, following_count, follower_count))
    }

    /// Update the caller's profile fields
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(display_name) = request.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }

        self.ctx.user_repo().update(&user).await?;
        self.get_profile(user_id).await
    }
}
