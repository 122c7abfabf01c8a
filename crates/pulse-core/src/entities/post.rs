//! Post entity and the symbol associations carried by feed candidates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Maximum length of a post body in characters
pub const MAX_POST_LENGTH: usize = 500;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to: Option<Snowflake>,
    /// Set by external moderation; hidden posts never enter a feed
    pub hidden: bool,
}

impl Post {
    /// Create a new top-level Post
    pub fn new(id: Snowflake, author_id: Snowflake, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at,
            reply_to: None,
            hidden: false,
        }
    }

    /// Create a reply to another post
    pub fn new_reply(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        created_at: DateTime<Utc>,
        reply_to: Snowflake,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at,
            reply_to: Some(reply_to),
            hidden: false,
        }
    }

    /// Check if this post is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Check if the body is effectively empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Creation timestamp in milliseconds since the Unix epoch
    #[inline]
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

/// Classification of a ticker symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SymbolKind {
    Stock,
    Crypto,
}

impl SymbolKind {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "STOCK",
            Self::Crypto => "CRYPTO",
        }
    }

    /// Parse from the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STOCK" => Some(Self::Stock),
            "CRYPTO" => Some(Self::Crypto),
            _ => None,
        }
    }
}

/// A ticker symbol associated with a post
///
/// `kind` is `None` for bare 2-5 letter tokens that could not be classified
/// at extraction time. Ranking compares tickers by string equality and never
/// looks at the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSymbol {
    /// Normalized uppercase ticker, e.g. "TSLA" or "BTC"
    pub ticker: String,
    pub kind: Option<SymbolKind>,
    pub exchange: Option<String>,
}

impl PostSymbol {
    /// Create a symbol association, normalizing the ticker to uppercase
    pub fn new(ticker: impl Into<String>, kind: Option<SymbolKind>, exchange: Option<String>) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            kind,
            exchange,
        }
    }
}

/// Denormalized author info carried by feed candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: Snowflake,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

/// A post joined to its symbol associations (used for interest mining)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithSymbols {
    pub post: Post,
    pub symbols: Vec<PostSymbol>,
}

/// The unit of work the feed scorer consumes: a post with its author,
/// symbol associations, and live reaction aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCandidate {
    pub post: Post,
    pub author: AuthorSummary,
    pub symbols: Vec<PostSymbol>,
    pub reactions: crate::entities::ReactionCounts,
}
