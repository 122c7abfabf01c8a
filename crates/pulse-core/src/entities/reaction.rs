//! Reaction entity - a typed reaction on a post
//!
//! One row per unique (post, user, kind) triple. Reacting again with the
//! same kind toggles the reaction off rather than accumulating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Reaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Boost,
    Bookmark,
}

impl ReactionKind {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Boost => "boost",
            Self::Bookmark => "bookmark",
        }
    }

    /// Parse from the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "boost" => Some(Self::Boost),
            "bookmark" => Some(Self::Bookmark),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(post_id: Snowflake, user_id: Snowflake, kind: ReactionKind, created_at: DateTime<Utc>) -> Self {
        Self {
            post_id,
            user_id,
            kind,
            created_at,
        }
    }
}

/// Per-kind reaction aggregate for a post, read live at score time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub boosts: i64,
    pub bookmarks: i64,
}

impl ReactionCounts {
    /// Create counts from per-kind values
    pub fn new(likes: i64, boosts: i64, bookmarks: i64) -> Self {
        Self {
            likes,
            boosts,
            bookmarks,
        }
    }

    /// Total reactions across all kinds
    pub fn total(&self) -> i64 {
        self.likes + self.boosts + self.bookmarks
    }

    /// Count for a single kind
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Boost => self.boosts,
            ReactionKind::Bookmark => self.bookmarks,
        }
    }

    /// Bump the count for a single kind (used when folding aggregate rows)
    pub fn add(&mut self, kind: ReactionKind, count: i64) {
        match kind {
            ReactionKind::Like => self.likes += count,
            ReactionKind::Boost => self.boosts += count,
            ReactionKind::Bookmark => self.bookmarks += count,
        }
    }
}

/// A reaction joined to the reacted post's symbol associations
/// (used for interest mining)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionWithSymbols {
    pub reaction: Reaction,
    pub symbols: Vec<crate::entities::PostSymbol>,
}
