//! Post service
//!
//! Handles post creation (including symbol extraction), retrieval, and
//! author-only deletion.

use chrono::Utc;
use tracing::{info, instrument};

use pulse_core::entities::Post;
use pulse_core::symbols::extract_symbols;
use pulse_core::{DomainError, Snowflake};

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post, extracting symbol associations from the body
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        self.ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        // A reply must reference a live post
        if let Some(parent_id) = request.reply_to {
            self.ctx
                .post_repo()
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Post", parent_id.to_string()))?;
        }

        let symbols = extract_symbols(&request.content);
        let id = self.ctx.generate_id();
        let now = Utc::now();

        let post = match request.reply_to {
            Some(parent_id) => Post::new_reply(id, author_id, request.content, now, parent_id),
            None => Post::new(id, author_id, request.content, now),
        };

        self.ctx.post_repo().create(&post, &symbols).await?;

        info!(
            post_id = %id,
            author_id = %author_id,
            symbols = symbols.len(),
            "Post created"
        );

        self.get_post(id).await
    }

    /// Fetch a post with author, symbols, and live reaction counts
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let candidate = self
            .ctx
            .post_repo()
            .find_with_details(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        Ok(PostResponse::from(&candidate))
    }

    /// Soft delete a post; only the author may delete
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if post.author_id != user_id {
            return Err(ServiceError::Domain(DomainError::NotPostAuthor));
        }

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, user_id = %user_id, "Post deleted");

        Ok(())
    }
}
