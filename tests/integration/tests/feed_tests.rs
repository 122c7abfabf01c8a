//! Feed pipeline tests over in-memory repositories
//!
//! Exercises the full service path: interest extraction, scoring, ranking,
//! cursor pagination, and the response envelope.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use integration_tests::fixtures::{fixed_now, InMemoryStore};
use integration_tests::helpers::{service_context, service_context_with};
use pulse_core::entities::ReactionKind;
use pulse_core::ranking::{FeedMode, RankingConfig, ScoreWeights};
use pulse_core::Snowflake;
use pulse_service::{FeedResponse, FeedService, InterestService, ReactionService};

const VIEWER: i64 = 1;
const AUTHOR_A: i64 = 2;
const AUTHOR_B: i64 = 3;

fn base_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_user(VIEWER, "viewer");
    store.add_user(AUTHOR_A, "alice");
    store.add_user(AUTHOR_B, "bob");
    store
}

async fn feed_page(
    store: &Arc<InMemoryStore>,
    mode: FeedMode,
    cursor: Option<&str>,
    limit: Option<i64>,
) -> FeedResponse {
    let ctx = service_context(store.clone());
    FeedService::new(&ctx)
        .get_feed_at(Snowflake::new(VIEWER), mode, cursor, limit, fixed_now())
        .await
        .expect("feed page")
}

// ============================================================================
// for_you mode
// ============================================================================

#[tokio::test]
async fn for_you_ranks_by_total_score_descending() {
    let store = base_store();
    // Old post with many reactions vs fresh quiet post
    store.add_post(10, AUTHOR_A, Duration::hours(20), &[]);
    store.add_post(11, AUTHOR_B, Duration::minutes(10), &[]);
    for user in 100..130 {
        store.add_reaction(10, user, ReactionKind::Like, Duration::hours(19));
    }

    let page = feed_page(&store, FeedMode::ForYou, None, None).await;

    assert_eq!(page.items.len(), 2);
    let scores: Vec<f64> = page
        .items
        .iter()
        .map(|item| item.score.expect("for_you items carry a breakdown").total_score)
        .collect();
    assert!(scores[0] >= scores[1]);
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn for_you_scores_are_deterministic() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(3), &["TSLA"]);
    store.add_post(11, AUTHOR_B, Duration::hours(5), &["BTC"]);
    store.add_reaction(10, 100, ReactionKind::Boost, Duration::hours(2));

    let first = feed_page(&store, FeedMode::ForYou, None, None).await;
    let second = feed_page(&store, FeedMode::ForYou, None, None).await;

    let a = serde_json::to_value(&first).unwrap();
    let b = serde_json::to_value(&second).unwrap();
    assert_eq!(a, b, "identical inputs and now must produce identical pages");
}

#[tokio::test]
async fn interest_profile_biases_ranking() {
    let store = base_store();
    // Viewer posts about TSLA, so it lands in their interest profile
    store.add_post(5, VIEWER, Duration::days(2), &["TSLA"]);
    // Two candidates identical except for the symbol
    store.add_post(10, AUTHOR_A, Duration::hours(6), &["TSLA"]);
    store.add_post(11, AUTHOR_B, Duration::hours(6), &["XYZ"]);

    let page = feed_page(&store, FeedMode::ForYou, None, None).await;

    // The viewer's own old post is outside the 24h window; only the two
    // candidates are eligible, and the symbol match breaks the tie
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].post.symbols.iter().any(|s| s.ticker == "TSLA"));
    let top = page.items[0].score.unwrap();
    assert!((top.symbol_match_score - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn empty_interest_profile_scores_zero_symbol_match() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(1), &["TSLA", "BTC"]);

    let page = feed_page(&store, FeedMode::ForYou, None, None).await;

    let score = page.items[0].score.unwrap();
    assert_eq!(score.symbol_match_score, 0.0);
    // Still a nonzero total from time decay alone
    assert!(score.total_score > 0.0);
}

#[tokio::test]
async fn for_you_excludes_replies_hidden_and_stale_posts() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(2), &[]);
    store.add_post_full(11, AUTHOR_A, Duration::hours(3), &[], Some(10), false); // reply
    store.add_post_full(12, AUTHOR_B, Duration::hours(4), &[], None, true); // hidden
    store.add_post(13, AUTHOR_B, Duration::hours(30), &[]); // outside 24h window

    let page = feed_page(&store, FeedMode::ForYou, None, None).await;

    let ids: Vec<&str> = page.items.iter().map(|i| i.post.id.as_str()).collect();
    assert_eq!(ids, ["10"]);
}

#[tokio::test]
async fn for_you_empty_window_returns_empty_page() {
    let store = base_store();

    let page = feed_page(&store, FeedMode::ForYou, None, None).await;

    assert!(page.items.is_empty());
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
}

// ============================================================================
// Ranked pagination
// ============================================================================

#[tokio::test]
async fn ranked_pagination_enumerates_every_post_exactly_once() {
    let store = base_store();
    // 12 eligible posts with spread ages and reaction volumes
    for i in 0..12 {
        let id = 100 + i;
        store.add_post(id, AUTHOR_A, Duration::hours(i) + Duration::minutes(7), &[]);
        for user in 0..(i * 3) {
            store.add_reaction(id, 1000 + user, ReactionKind::Like, Duration::hours(i));
        }
    }

    let limit = 5;
    let mut seen: Vec<String> = Vec::new();
    let mut scores: Vec<f64> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = feed_page(&store, FeedMode::ForYou, cursor.as_deref(), Some(limit)).await;
        for item in &page.items {
            seen.push(item.post.id.clone());
            scores.push(item.score.unwrap().total_score);
        }
        pages += 1;
        assert!(pages < 10, "pagination must terminate");
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
        assert!(cursor.is_some(), "has_more implies a cursor");
    }

    // Every eligible post exactly once, no duplicates, no gaps
    assert_eq!(seen.len(), 12);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 12);

    // Strictly non-increasing score order across the whole traversal
    for window in scores.windows(2) {
        assert!(
            window[0] >= window[1],
            "scores must be non-increasing: {} then {}",
            window[0],
            window[1]
        );
    }
}

#[tokio::test]
async fn ranked_pagination_keeps_equal_engagement_posts_newest_first() {
    let store = base_store();
    // Identical posts except creation time, minutes apart: decay alone
    // separates them, so the traversal must come out newest to oldest
    for i in 0..6 {
        store.add_post(200 + i, AUTHOR_A, Duration::hours(2) + Duration::minutes(10 * i), &[]);
    }

    let first = feed_page(&store, FeedMode::ForYou, None, Some(3)).await;
    assert!(first.has_more);
    let second = feed_page(&store, FeedMode::ForYou, first.next_cursor.as_deref(), Some(3)).await;

    let ids: Vec<&str> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|i| i.post.id.as_str())
        .collect();
    assert_eq!(ids, ["200", "201", "202", "203", "204", "205"]);

    // A full final page still reports has_more; the next page comes back empty
    assert!(second.has_more);
    let third = feed_page(&store, FeedMode::ForYou, second.next_cursor.as_deref(), Some(3)).await;
    assert!(third.items.is_empty());
    assert!(!third.has_more);
}

#[tokio::test]
async fn malformed_cursor_is_treated_as_no_cursor() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(1), &[]);
    store.add_post(11, AUTHOR_B, Duration::hours(2), &[]);

    let baseline = feed_page(&store, FeedMode::ForYou, None, None).await;
    for junk in ["???", "not-base64!", "dG90YWxseS1ib2d1cw"] {
        let page = feed_page(&store, FeedMode::ForYou, Some(junk), None).await;
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::to_value(&baseline).unwrap(),
            "malformed cursor {junk:?} must behave like no cursor"
        );
    }
}

// ============================================================================
// following mode
// ============================================================================

#[tokio::test]
async fn following_is_chronological_and_unscored() {
    let store = base_store();
    store.add_follow(VIEWER, AUTHOR_A);
    store.add_post(10, AUTHOR_A, Duration::hours(5), &[]);
    store.add_post(11, AUTHOR_A, Duration::hours(1), &[]);
    store.add_post(12, AUTHOR_B, Duration::minutes(5), &[]); // not followed

    let page = feed_page(&store, FeedMode::Following, None, None).await;

    let ids: Vec<&str> = page.items.iter().map(|i| i.post.id.as_str()).collect();
    assert_eq!(ids, ["11", "10"], "newest first, followed authors only");
    assert!(page.items.iter().all(|i| i.score.is_none()));
}

#[tokio::test]
async fn following_includes_replies_and_old_posts() {
    let store = base_store();
    store.add_follow(VIEWER, AUTHOR_A);
    store.add_post(10, AUTHOR_A, Duration::days(3), &[]);
    store.add_post_full(11, AUTHOR_A, Duration::hours(1), &[], Some(10), false);

    let page = feed_page(&store, FeedMode::Following, None, None).await;

    let ids: Vec<&str> = page.items.iter().map(|i| i.post.id.as_str()).collect();
    assert_eq!(ids, ["11", "10"]);
}

#[tokio::test]
async fn following_pagination_walks_the_whole_timeline() {
    let store = base_store();
    store.add_follow(VIEWER, AUTHOR_A);
    for i in 0..7 {
        store.add_post(100 + i, AUTHOR_A, Duration::hours(i + 1), &[]);
    }

    let mut seen: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = feed_page(&store, FeedMode::Following, cursor.as_deref(), Some(3)).await;
        seen.extend(page.items.iter().map(|i| i.post.id.clone()));
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
    }

    assert_eq!(seen, ["100", "101", "102", "103", "104", "105", "106"]);
}

#[tokio::test]
async fn score_weights_come_from_injected_configuration() {
    let store = base_store();
    // Heavily reacted 20h-old post vs a fresh quiet one
    store.add_post(10, AUTHOR_A, Duration::hours(20), &[]);
    store.add_post(11, AUTHOR_B, Duration::minutes(10), &[]);
    for user in 100..120 {
        store.add_reaction(10, user, ReactionKind::Like, Duration::hours(19));
    }

    let decay_only = RankingConfig {
        score_weights: ScoreWeights {
            reaction: 0.0,
            decay: 1.0,
            symbol: 0.0,
        },
        ..RankingConfig::default()
    };
    let ctx = service_context_with(store.clone(), decay_only);
    let page = FeedService::new(&ctx)
        .get_feed_at(Snowflake::new(VIEWER), FeedMode::ForYou, None, None, fixed_now())
        .await
        .unwrap();
    assert_eq!(page.items[0].post.id, "11", "decay-only weights favor the fresh post");

    let reaction_only = RankingConfig {
        score_weights: ScoreWeights {
            reaction: 1.0,
            decay: 0.0,
            symbol: 0.0,
        },
        ..RankingConfig::default()
    };
    let ctx = service_context_with(store, reaction_only);
    let page = FeedService::new(&ctx)
        .get_feed_at(Snowflake::new(VIEWER), FeedMode::ForYou, None, None, fixed_now())
        .await
        .unwrap();
    assert_eq!(page.items[0].post.id, "10", "reaction-only weights favor the engaged post");
}

// ============================================================================
// Validation and failure semantics
// ============================================================================

#[tokio::test]
async fn out_of_range_limit_is_rejected_before_fetching() {
    let store = base_store();
    let ctx = service_context(store);
    let service = FeedService::new(&ctx);

    for bad in [0, -1, 51, 1000] {
        let result = service
            .get_feed_at(Snowflake::new(VIEWER), FeedMode::ForYou, None, Some(bad), fixed_now())
            .await;
        assert!(result.is_err(), "limit {bad} must be rejected");
        assert_eq!(result.unwrap_err().status_code(), 400);
    }
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let store = base_store();
    let ctx = service_context(store);
    let result = FeedService::new(&ctx)
        .get_feed_at(Snowflake::new(999), FeedMode::ForYou, None, None, fixed_now())
        .await;

    assert_eq!(result.unwrap_err().status_code(), 404);
}

// ============================================================================
// Interest extraction
// ============================================================================

#[tokio::test]
async fn interest_profile_combines_posts_and_reactions() {
    let store = base_store();
    // Own post: TSLA gets weight 3
    store.add_post(10, VIEWER, Duration::days(1), &["TSLA"]);
    // Reactions to two BTC posts: BTC gets weight 2
    store.add_post(11, AUTHOR_A, Duration::days(2), &["BTC"]);
    store.add_post(12, AUTHOR_B, Duration::days(2), &["BTC"]);
    store.add_reaction(11, VIEWER, ReactionKind::Like, Duration::days(1));
    store.add_reaction(12, VIEWER, ReactionKind::Bookmark, Duration::days(1));

    let ctx = service_context(store);
    let profile = InterestService::new(&ctx)
        .interest_profile(Snowflake::new(VIEWER), fixed_now())
        .await
        .unwrap();

    assert_eq!(profile.tickers(), ["TSLA", "BTC"]);
}

#[tokio::test]
async fn interest_profile_ignores_posts_older_than_lookback() {
    let store = base_store();
    store.add_post(10, VIEWER, Duration::days(8), &["TSLA"]);

    let ctx = service_context(store);
    let profile = InterestService::new(&ctx)
        .interest_profile(Snowflake::new(VIEWER), fixed_now())
        .await
        .unwrap();

    assert!(profile.is_empty());
}

// ============================================================================
// Reaction toggle
// ============================================================================

#[tokio::test]
async fn reaction_toggle_is_an_idempotent_pair() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(1), &[]);
    store.add_reaction(10, 500, ReactionKind::Like, Duration::minutes(30));
    let before_rows = store.reaction_rows();

    let ctx = service_context(store.clone());
    let service = ReactionService::new(&ctx);

    let on = service
        .toggle_reaction(Snowflake::new(10), Snowflake::new(VIEWER), ReactionKind::Like)
        .await
        .unwrap();
    assert!(on.reacted);
    assert_eq!(on.reactions.likes, 2);

    let off = service
        .toggle_reaction(Snowflake::new(10), Snowflake::new(VIEWER), ReactionKind::Like)
        .await
        .unwrap();
    assert!(!off.reacted);
    assert_eq!(off.reactions.likes, 1);

    // Add-then-remove restores the original stored state
    assert_eq!(store.reaction_rows(), before_rows);
}

#[tokio::test]
async fn reaction_kinds_toggle_independently() {
    let store = base_store();
    store.add_post(10, AUTHOR_A, Duration::hours(1), &[]);

    let ctx = service_context(store);
    let service = ReactionService::new(&ctx);

    service
        .toggle_reaction(Snowflake::new(10), Snowflake::new(VIEWER), ReactionKind::Like)
        .await
        .unwrap();
    let boosted = service
        .toggle_reaction(Snowflake::new(10), Snowflake::new(VIEWER), ReactionKind::Boost)
        .await
        .unwrap();

    assert_eq!(boosted.reactions.likes, 1);
    assert_eq!(boosted.reactions.boosts, 1);
    assert_eq!(boosted.reactions.bookmarks, 0);
}
