//! Entity -> response DTO mappers

use pulse_core::entities::{AuthorSummary, FeedCandidate, PostSymbol, ReactionCounts, User};
use pulse_core::ranking::ScoreBreakdown;

use super::responses::{
    AuthorResponse, FeedItemResponse, PostResponse, ReactionCountsResponse,
    ScoreBreakdownResponse, SymbolResponse, UserResponse,
};

impl From<&AuthorSummary> for AuthorResponse {
    fn from(author: &AuthorSummary) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username.clone(),
            display_name: author.display_name.clone(),
            avatar: author.avatar.clone(),
        }
    }
}

impl From<&PostSymbol> for SymbolResponse {
    fn from(symbol: &PostSymbol) -> Self {
        Self {
            ticker: symbol.ticker.clone(),
            kind: symbol.kind.map(|k| k.as_str()),
            exchange: symbol.exchange.clone(),
        }
    }
}

impl From<ReactionCounts> for ReactionCountsResponse {
    fn from(counts: ReactionCounts) -> Self {
        Self {
            likes: counts.likes,
            boosts: counts.boosts,
            bookmarks: counts.bookmarks,
        }
    }
}

impl From<ScoreBreakdown> for ScoreBreakdownResponse {
    fn from(score: ScoreBreakdown) -> Self {
        Self {
            initial_reaction_score: score.initial_reaction_score,
            time_decay_score: score.time_decay_score,
            symbol_match_score: score.symbol_match_score,
            total_score: score.total_score,
        }
    }
}

impl From<&FeedCandidate> for PostResponse {
    fn from(candidate: &FeedCandidate) -> Self {
        Self {
            id: candidate.post.id.to_string(),
            author: AuthorResponse::from(&candidate.author),
            content: candidate.post.content.clone(),
            created_at: candidate.post.created_at,
            reply_to: candidate.post.reply_to.map(|id| id.to_string()),
            symbols: candidate.symbols.iter().map(SymbolResponse::from).collect(),
            reactions: ReactionCountsResponse::from(candidate.reactions),
        }
    }
}

impl FeedItemResponse {
    /// Build a feed item, attaching the score breakdown in for_you mode
    pub fn from_candidate(candidate: &FeedCandidate, score: Option<ScoreBreakdown>) -> Self {
        Self {
            post: PostResponse::from(candidate),
            score: score.map(ScoreBreakdownResponse::from),
        }
    }
}

impl UserResponse {
    /// Build a profile response from the entity plus follow counts
    pub fn from_user(user: &User, following_count: i64, follower_count: i64) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            following_count,
            follower_count,
            created_at: user.created_at,
        }
    }
}
