//! Feed ranking core
//!
//! Pure, deterministic scoring and pagination primitives. Everything here is
//! request-scoped CPU work over already-materialized data: no I/O, no shared
//! mutable state, no wall-clock reads beyond the `now` passed in by callers.

mod config;
mod cursor;
mod interest;
mod scorer;

pub use config::{RankingConfig, ReactionWeights, ScoreWeights};
pub use cursor::FeedCursor;
pub use interest::{
    InterestProfile, INTEREST_LOOKBACK_DAYS, MAX_INTEREST_SYMBOLS, MAX_OWN_POSTS,
    MAX_REACTED_POSTS, OWN_POST_SYMBOL_WEIGHT, REACTED_POST_SYMBOL_WEIGHT,
};
pub use scorer::{
    initial_reaction_score, rank_candidates, round4, score_candidate, symbol_match_bonus,
    time_decay, ScoreBreakdown, ScoredCandidate, DECAY_TAU_HOURS, EARLY_REACTION_MULTIPLIER,
};

use serde::{Deserialize, Serialize};

/// Feed retrieval mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    /// Algorithmic ranking over the recent-post window
    ForYou,
    /// Reverse-chronological posts from followed authors
    Following,
}

impl FeedMode {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForYou => "for_you",
            Self::Following => "following",
        }
    }
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
