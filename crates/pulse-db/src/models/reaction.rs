//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub post_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate row from the per-kind reaction count query
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountRowModel {
    pub post_id: i64,
    pub kind: String,
    pub count: i64,
}
