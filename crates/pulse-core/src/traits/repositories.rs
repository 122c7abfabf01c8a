//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! the implementation. The feed pipeline consumes these as its only window
//! onto storage, so the ranking core stays testable against in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    FeedCandidate, Follow, Post, PostSymbol, PostWithSymbols, Reaction, ReactionCounts,
    ReactionKind, ReactionWithSymbols, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    ///
    /// User records are provisioned by the upstream identity service; this
    /// layer only reads and updates profile fields.
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Update profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Post Repository (candidate source)
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID (excludes soft-deleted posts)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Find post by ID with author, symbols, and live reaction counts
    async fn find_with_details(&self, id: Snowflake) -> RepoResult<Option<FeedCandidate>>;

    /// Create a post together with its symbol associations
    async fn create(&self, post: &Post, symbols: &[PostSymbol]) -> RepoResult<()>;

    /// Soft delete a post
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Posts authored by users the caller follows, newest first
    ///
    /// `before` is a strict upper bound on creation time. Callers overfetch
    /// by one row to detect whether more pages exist.
    async fn fetch_following_candidates(
        &self,
        user_id: Snowflake,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<FeedCandidate>>;

    /// Non-hidden, non-reply posts created at or after `since`, newest first
    ///
    /// This is the ranked-mode candidate pool; the assembler re-ranks it and
    /// applies the cursor after scoring.
    async fn fetch_recent_candidates(
        &self,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<FeedCandidate>>;

    /// The user's own recent posts with symbols (interest mining input)
    async fn fetch_user_recent_posts(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<PostWithSymbols>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a reaction by its unique (post, user, kind) triple
    async fn find(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<Option<Reaction>>;

    /// Add a reaction (no-op if the triple already exists)
    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove a reaction
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake, kind: ReactionKind)
        -> RepoResult<()>;

    /// Live per-kind aggregate for a post
    async fn counts_for_post(&self, post_id: Snowflake) -> RepoResult<ReactionCounts>;

    /// The user's most recent reactions joined to the reacted posts' symbols
    /// (interest mining input), newest first
    async fn fetch_user_recent_reactions(
        &self,
        user_id: Snowflake,
        max_rows: i64,
    ) -> RepoResult<Vec<ReactionWithSymbols>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create a follow edge (no-op if it already exists)
    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Remove a follow edge
    async fn delete(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<()>;

    /// Number of users this user follows
    async fn following_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Number of users following this user
    async fn follower_count(&self, user_id: Snowflake) -> RepoResult<i64>;
}
