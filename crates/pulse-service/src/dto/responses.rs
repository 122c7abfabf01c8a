//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Snowflake IDs are
//! serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub following_count: i64,
    pub follower_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Denormalized author fields carried by feed items
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ============================================================================
// Post / Feed Responses
// ============================================================================

/// A symbol association on a post
#[derive(Debug, Clone, Serialize)]
pub struct SymbolResponse {
    pub ticker: String,
    /// "STOCK", "CRYPTO", or absent when the kind is undefined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

/// Per-kind reaction counts
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionCountsResponse {
    pub likes: i64,
    pub boosts: i64,
    pub bookmarks: i64,
}

/// The scoring sub-terms attached to for_you feed items
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdownResponse {
    pub initial_reaction_score: f64,
    pub time_decay_score: f64,
    pub symbol_match_score: f64,
    pub total_score: f64,
}

/// A post with author, symbols, and reaction counts
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author: AuthorResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub symbols: Vec<SymbolResponse>,
    pub reactions: ReactionCountsResponse,
}

/// A feed item: a post plus, in for_you mode only, its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct FeedItemResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreBreakdownResponse>,
}

/// Feed page envelope
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItemResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// ============================================================================
// Reaction / Follow Responses
// ============================================================================

/// Result of a reaction toggle
#[derive(Debug, Serialize)]
pub struct ReactionToggleResponse {
    pub post_id: String,
    pub kind: &'static str,
    /// Whether the reaction is present after the toggle
    pub reacted: bool,
    pub reactions: ReactionCountsResponse,
}

/// Result of a follow/unfollow
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub user_id: String,
    /// Whether the caller follows the user after the operation
    pub following: bool,
}
