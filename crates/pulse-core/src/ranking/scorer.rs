//! Feed scoring math
//!
//! Pure functions over already-fetched data. `now` is always passed in
//! explicitly; nothing here reads the wall clock, logs, or touches storage,
//! so repeated calls with the same inputs produce identical results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{FeedCandidate, PostSymbol, ReactionCounts};

use super::config::RankingConfig;
use super::interest::InterestProfile;

/// Decay time constant: scores fall off as exp(-age_hours / 6)
pub const DECAY_TAU_HOURS: f64 = 6.0;

/// Multiplier applied to reactions gathered inside the recency window
pub const EARLY_REACTION_MULTIPLIER: f64 = 1.5;

/// The three sub-scores plus their weighted combination, attached to every
/// for_you item for debuggability. Recomputed on every request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub initial_reaction_score: f64,
    pub time_decay_score: f64,
    pub symbol_match_score: f64,
    pub total_score: f64,
}

/// A candidate paired with its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: FeedCandidate,
    pub score: ScoreBreakdown,
}

/// Round to 4 decimal places (the precision of every score on the wire)
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Exponential time decay: 1.0 at age zero, halving roughly every 4.16 hours
pub fn time_decay(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - created_at).num_milliseconds() as f64 / 3_600_000.0;
    (-age_hours.max(0.0) / DECAY_TAU_HOURS).exp()
}

/// Log-compressed weighted reaction volume, boosted for young posts
///
/// The `+ 1` keeps `ln` defined at zero reactions; the log keeps a single
/// viral post from dominating on volume alone.
pub fn initial_reaction_score(
    created_at: DateTime<Utc>,
    counts: ReactionCounts,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> f64 {
    let weights = config.reaction_weights;
    let base = counts.likes as f64 * weights.like
        + counts.boosts as f64 * weights.boost
        + counts.bookmarks as f64 * weights.bookmark;

    // Boundary is inclusive: a post exactly at the window edge counts as early
    let multiplier = if now - created_at <= config.recent_reaction_window {
        EARLY_REACTION_MULTIPLIER
    } else {
        1.0
    };

    round4((base + 1.0).ln() * multiplier)
}

/// Fraction of the interest profile matched by the post's symbols, in [0, 1]
///
/// An empty profile contributes exactly zero regardless of the post.
pub fn symbol_match_bonus(post_symbols: &[PostSymbol], interests: &InterestProfile) -> f64 {
    if interests.is_empty() {
        return 0.0;
    }
    let matches = post_symbols
        .iter()
        .filter(|symbol| interests.contains(&symbol.ticker))
        .count();
    (matches as f64 / interests.len().max(1) as f64).min(1.0)
}

/// Score a single candidate
pub fn score_candidate(
    candidate: &FeedCandidate,
    interests: &InterestProfile,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> ScoreBreakdown {
    let decay = time_decay(candidate.post.created_at, now);
    let reaction = initial_reaction_score(candidate.post.created_at, candidate.reactions, now, config);
    let symbol = symbol_match_bonus(&candidate.symbols, interests);

    let weights = config.score_weights;
    let total = round4(weights.reaction * reaction + weights.decay * decay + weights.symbol * symbol);

    ScoreBreakdown {
        initial_reaction_score: reaction,
        time_decay_score: round4(decay),
        symbol_match_score: round4(symbol),
        total_score: total,
    }
}

/// Score every candidate and stable-sort descending by total score
///
/// The input order is the fetch order (creation-time descending); a stable
/// sort keeps it as the tiebreak, so equal scores rank newest-first.
pub fn rank_candidates(
    candidates: Vec<FeedCandidate>,
    interests: &InterestProfile,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, interests, now, config);
            ScoredCandidate { candidate, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_score.total_cmp(&a.score.total_score));
    scored
}
