//! Ranking configuration values
//!
//! Read once at process start and injected everywhere; both feed modes see
//! the same values.

use chrono::Duration;

/// Per-kind reaction weights used by the initial reaction score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionWeights {
    pub like: f64,
    pub boost: f64,
    pub bookmark: f64,
}

impl Default for ReactionWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            boost: 3.0,
            bookmark: 2.0,
        }
    }
}

/// Weights of the three sub-scores in the total score
///
/// Not required to sum to 1, though the defaults do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// α: weight of the initial reaction score
    pub reaction: f64,
    /// β: weight of the time decay score
    pub decay: f64,
    /// γ: weight of the symbol match bonus
    pub symbol: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            reaction: 0.4,
            decay: 0.3,
            symbol: 0.3,
        }
    }
}

/// Complete ranking configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    pub reaction_weights: ReactionWeights,
    pub score_weights: ScoreWeights,
    /// Posts younger than this get the early-reaction multiplier (inclusive)
    pub recent_reaction_window: Duration,
    /// Rolling window for for_you candidates
    pub max_candidate_age: Duration,
    /// Page size applied when the request does not name one
    pub default_page_size: i64,
    /// Upper bound on the requested page size
    pub max_page_size: i64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            reaction_weights: ReactionWeights::default(),
            score_weights: ScoreWeights::default(),
            recent_reaction_window: Duration::hours(2),
            max_candidate_age: Duration::hours(24),
            default_page_size: 20,
            max_page_size: 50,
        }
    }
}
