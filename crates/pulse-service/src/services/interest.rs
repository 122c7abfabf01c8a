//! Interest extraction service
//!
//! Mines a per-request interest profile from the user's recent activity:
//! symbols on their own posts from the last 7 days (most recent 20) and on
//! posts they reacted to (most recent 50). Nothing is persisted; the profile
//! lives for one feed request.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use pulse_core::ranking::{
    InterestProfile, INTEREST_LOOKBACK_DAYS, MAX_OWN_POSTS, MAX_REACTED_POSTS,
};
use pulse_core::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Interest extraction service
pub struct InterestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InterestService<'a> {
    /// Create a new InterestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the user's interest profile as of `now`
    ///
    /// Returns an empty profile for users with no qualifying activity; the
    /// caller treats that as "symbol match contributes zero", not an error.
    #[instrument(skip(self))]
    pub async fn interest_profile(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<InterestProfile> {
        let since = now - Duration::days(INTEREST_LOOKBACK_DAYS);

        let own_posts = self
            .ctx
            .post_repo()
            .fetch_user_recent_posts(user_id, since, MAX_OWN_POSTS)
            .await?;
        let reactions = self
            .ctx
            .reaction_repo()
            .fetch_user_recent_reactions(user_id, MAX_REACTED_POSTS)
            .await?;

        let own_tickers = own_posts
            .iter()
            .flat_map(|p| p.symbols.iter().map(|s| s.ticker.as_str()));
        let reacted_tickers = reactions
            .iter()
            .flat_map(|r| r.symbols.iter().map(|s| s.ticker.as_str()));

        let profile = InterestProfile::build(own_tickers, reacted_tickers);

        debug!(
            user_id = %user_id,
            own_posts = own_posts.len(),
            reactions = reactions.len(),
            interests = profile.len(),
            "Interest profile built"
        );

        Ok(profile)
    }
}
