//! Feed assembly service
//!
//! Orchestrates the candidate source, interest extraction, and the scorer:
//! mode dispatch, ranking, cursor pagination, and response shaping.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use pulse_core::entities::FeedCandidate;
use pulse_core::ranking::{rank_candidates, FeedCursor, FeedMode, RankingConfig, ScoredCandidate};
use pulse_core::Snowflake;

use crate::dto::{FeedItemResponse, FeedResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::interest::InterestService;

/// Ranked mode overfetches this multiple of the page size so the scorer has a
/// wide pool to re-rank
const CANDIDATE_MULTIPLIER: i64 = 3;

/// Hard cap on the ranked candidate pool
///
/// Bounds resource usage per request. The pool is a chronological slice of
/// the eligible window, so the true top posts of a very busy window may fall
/// outside it; that approximation is intentional.
const CANDIDATE_CAP: i64 = 100;

/// Feed assembly service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Produce one feed page for a user
    ///
    /// Reads the clock once; every score in the request sees the same `now`.
    #[instrument(skip(self))]
    pub async fn get_feed(
        &self,
        user_id: Snowflake,
        mode: FeedMode,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> ServiceResult<FeedResponse> {
        self.get_feed_at(user_id, mode, cursor, limit, Utc::now()).await
    }

    /// Produce one feed page as of an explicit `now`
    ///
    /// `cursor` is decoded leniently: any malformed token is treated as
    /// absent and the page starts from the newest items. An out-of-range
    /// `limit` is rejected before anything is fetched.
    #[instrument(skip(self))]
    pub async fn get_feed_at(
        &self,
        user_id: Snowflake,
        mode: FeedMode,
        cursor: Option<&str>,
        limit: Option<i64>,
        now: DateTime<Utc>,
    ) -> ServiceResult<FeedResponse> {
        let config = *self.ctx.ranking();
        let limit = resolve_limit(limit, &config)?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let cursor = cursor.and_then(|token| FeedCursor::decode(mode, token));

        let response = match mode {
            FeedMode::Following => self.chronological_page(user_id, cursor, limit).await?,
            FeedMode::ForYou => self.ranked_page(user_id, cursor, limit, now, &config).await?,
        };

        info!(
            user_id = %user_id,
            mode = %mode,
            items = response.items.len(),
            has_more = response.has_more,
            "Feed page served"
        );

        Ok(response)
    }

    /// Chronological path: candidates arrive in final order, no extra sort
    async fn chronological_page(
        &self,
        user_id: Snowflake,
        cursor: Option<FeedCursor>,
        limit: i64,
    ) -> ServiceResult<FeedResponse> {
        let before = match cursor {
            Some(FeedCursor::Chronological { before }) => Some(before),
            _ => None,
        };

        // Overfetch by one row to detect whether another page exists
        let fetched = self
            .ctx
            .post_repo()
            .fetch_following_candidates(user_id, before, limit + 1)
            .await?;

        let has_more = fetched.len() as i64 > limit;
        let page: Vec<FeedCandidate> = fetched.into_iter().take(limit as usize).collect();

        let next_cursor = if has_more {
            page.last()
                .map(|candidate| FeedCursor::chronological(candidate.post.created_at).encode())
        } else {
            None
        };

        Ok(FeedResponse {
            items: page
                .iter()
                .map(|candidate| FeedItemResponse::from_candidate(candidate, None))
                .collect(),
            next_cursor,
            has_more,
        })
    }

    /// Algorithmic path: score the recent-post window, sort, resume at the
    /// cursor position, truncate
    async fn ranked_page(
        &self,
        user_id: Snowflake,
        cursor: Option<FeedCursor>,
        limit: i64,
        now: DateTime<Utc>,
        config: &RankingConfig,
    ) -> ServiceResult<FeedResponse> {
        let interests = InterestService::new(self.ctx)
            .interest_profile(user_id, now)
            .await?;

        let since = now - config.max_candidate_age;
        let max_rows = (limit * CANDIDATE_MULTIPLIER).min(CANDIDATE_CAP);
        let pool = self
            .ctx
            .post_repo()
            .fetch_recent_candidates(since, max_rows)
            .await?;
        let fetched_count = pool.len() as i64;

        let ranked = rank_candidates(pool, &interests, now, config);

        // The cursor is applied after scoring so the pool stays stable across
        // pages and score order holds over the whole traversal
        let eligible: Vec<ScoredCandidate> = match cursor {
            Some(cursor @ FeedCursor::Ranked { .. }) => ranked
                .into_iter()
                .filter(|scored| {
                    cursor.admits_ranked(
                        scored.score.total_score,
                        scored.candidate.post.created_at_millis(),
                    )
                })
                .collect(),
            _ => ranked,
        };

        let page: Vec<ScoredCandidate> = eligible.into_iter().take(limit as usize).collect();
        let has_more = fetched_count > limit && page.len() as i64 == limit;

        let next_cursor = if has_more {
            page.last().map(|scored| {
                FeedCursor::ranked(
                    scored.score.total_score,
                    scored.candidate.post.created_at_millis(),
                )
                .encode()
            })
        } else {
            None
        };

        Ok(FeedResponse {
            items: page
                .iter()
                .map(|scored| FeedItemResponse::from_candidate(&scored.candidate, Some(scored.score)))
                .collect(),
            next_cursor,
            has_more,
        })
    }
}

/// Resolve the page size: default when absent, error when out of range
fn resolve_limit(limit: Option<i64>, config: &RankingConfig) -> ServiceResult<i64> {
    match limit {
        None => Ok(config.default_page_size),
        Some(requested) if (1..=config.max_page_size).contains(&requested) => Ok(requested),
        Some(requested) => Err(ServiceError::validation(format!(
            "limit must be between 1 and {}, got {requested}",
            config.max_page_size
        ))),
    }
}
