//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to: Option<i64>,
    pub hidden: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PostModel {
    /// Check if the post is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the post is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Candidate row: a post joined to its author's denormalized fields
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRowModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to: Option<i64>,
    pub hidden: bool,
    pub author_username: String,
    pub author_display_name: Option<String>,
    pub author_avatar: Option<String>,
}

/// Database model for the post_symbols table
#[derive(Debug, Clone, FromRow)]
pub struct PostSymbolModel {
    pub post_id: i64,
    pub ticker: String,
    pub kind: Option<String>,
    pub exchange: Option<String>,
}
