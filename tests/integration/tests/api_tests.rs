//! HTTP-level tests
//!
//! Drives the full Axum app (routes, extractors, error envelope) over the
//! in-memory store with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use integration_tests::fixtures::InMemoryStore;
use integration_tests::helpers::{authed_get, authed_post_json, authed_put, json_body, send, test_app};
use pulse_core::entities::ReactionKind;
use serde_json::json;

const VIEWER: i64 = 1;
const AUTHOR: i64 = 3;

/// Store with posts created relative to the real clock, since the server
/// resolves `now` itself
fn http_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_user(VIEWER, "viewer");
    store.add_user(AUTHOR, "carol");

    let now = Utc::now();
    store.add_post_at(10, AUTHOR, now - Duration::hours(1), &["TSLA"], None, false);
    store.add_post_at(11, AUTHOR, now - Duration::hours(4), &["BTC"], None, false);
    store
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app(http_store());

    let health = send(app.clone(), authed_get("/health", VIEWER)).await.unwrap();
    let body = json_body(health, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");

    let ready = send(app, authed_get("/health/ready", VIEWER)).await.unwrap();
    let body = json_body(ready, StatusCode::OK).await.unwrap();
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn feed_requires_identity_header() {
    let app = test_app(http_store());

    let request = Request::builder()
        .uri("/api/v1/feed?mode=for_you")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await.unwrap();

    let body = json_body(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "MISSING_AUTHENTICATION");
}

#[tokio::test]
async fn unknown_feed_mode_is_rejected() {
    let app = test_app(http_store());

    let response = send(app, authed_get("/api/v1/feed?mode=trending", VIEWER))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_limit_is_rejected() {
    let app = test_app(http_store());

    let response = send(app, authed_get("/api/v1/feed?mode=for_you&limit=1000", VIEWER))
        .await
        .unwrap();

    let body = json_body(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn for_you_feed_returns_scored_items() {
    let app = test_app(http_store());

    let response = send(app, authed_get("/api/v1/feed?mode=for_you", VIEWER))
        .await
        .unwrap();
    let body = json_body(response, StatusCode::OK).await.unwrap();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Ids serialize as strings; every for_you item carries a breakdown
    assert!(items[0]["id"].is_string());
    assert!(items[0]["score"]["total_score"].is_number());
    assert_eq!(body["has_more"], false);
    assert_eq!(body["next_cursor"], serde_json::Value::Null);
}

#[tokio::test]
async fn malformed_cursor_behaves_like_no_cursor() {
    let app = test_app(http_store());

    let clean = send(app.clone(), authed_get("/api/v1/feed?mode=for_you", VIEWER))
        .await
        .unwrap();
    let clean_body = json_body(clean, StatusCode::OK).await.unwrap();

    let junk = send(
        app,
        authed_get("/api/v1/feed?mode=for_you&cursor=bogus-token", VIEWER),
    )
    .await
    .unwrap();
    let junk_body = json_body(junk, StatusCode::OK).await.unwrap();

    assert_eq!(
        clean_body["items"].as_array().unwrap().len(),
        junk_body["items"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn create_post_extracts_symbols() {
    let app = test_app(http_store());

    let response = send(
        app,
        authed_post_json(
            "/api/v1/posts",
            VIEWER,
            json!({"content": "loading up on $TSLA while BTC cools off"}),
        ),
    )
    .await
    .unwrap();

    let body = json_body(response, StatusCode::CREATED).await.unwrap();
    let symbols = body["symbols"].as_array().unwrap();
    let tickers: Vec<&str> = symbols.iter().map(|s| s["ticker"].as_str().unwrap()).collect();
    assert_eq!(tickers, ["TSLA", "BTC"]);
    assert_eq!(symbols[0]["kind"], "STOCK");
    assert_eq!(symbols[1]["kind"], "CRYPTO");
}

#[tokio::test]
async fn empty_post_body_fails_validation() {
    let app = test_app(http_store());

    let response = send(
        app,
        authed_post_json("/api/v1/posts", VIEWER, json!({"content": ""})),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reaction_toggles_on_and_off() {
    let store = http_store();
    let app = test_app(store.clone());

    let on = send(app.clone(), authed_put("/api/v1/posts/10/reactions/like", VIEWER))
        .await
        .unwrap();
    let body = json_body(on, StatusCode::OK).await.unwrap();
    assert_eq!(body["reacted"], true);
    assert_eq!(body["reactions"]["likes"], 1);

    let off = send(app, authed_put("/api/v1/posts/10/reactions/like", VIEWER))
        .await
        .unwrap();
    let body = json_body(off, StatusCode::OK).await.unwrap();
    assert_eq!(body["reacted"], false);
    assert_eq!(body["reactions"]["likes"], 0);
}

#[tokio::test]
async fn unknown_reaction_kind_is_rejected() {
    let app = test_app(http_store());

    let response = send(app, authed_put("/api/v1/posts/10/reactions/clap", VIEWER))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn follow_feeds_the_following_timeline() {
    let store = http_store();
    let app = test_app(store.clone());

    // Nothing followed yet
    let empty = send(app.clone(), authed_get("/api/v1/feed?mode=following", VIEWER))
        .await
        .unwrap();
    let body = json_body(empty, StatusCode::OK).await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let follow = send(app.clone(), authed_put("/api/v1/users/3/follow", VIEWER))
        .await
        .unwrap();
    let body = json_body(follow, StatusCode::OK).await.unwrap();
    assert_eq!(body["following"], true);

    let feed = send(app, authed_get("/api/v1/feed?mode=following", VIEWER))
        .await
        .unwrap();
    let body = json_body(feed, StatusCode::OK).await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Chronological items carry no score breakdown
    assert!(items[0].get("score").is_none());
    // Newest first
    assert_eq!(items[0]["id"], "10");
    assert_eq!(items[1]["id"], "11");
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let app = test_app(http_store());

    let response = send(app, authed_put("/api/v1/users/1/follow", VIEWER))
        .await
        .unwrap();

    let body = json_body(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "CANNOT_FOLLOW_SELF");
}

#[tokio::test]
async fn user_profile_includes_follow_counts() {
    let store = http_store();
    store.add_follow(VIEWER, AUTHOR);
    let app = test_app(store);

    let response = send(app, authed_get("/api/v1/users/3", VIEWER)).await.unwrap();
    let body = json_body(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["username"], "carol");
    assert_eq!(body["follower_count"], 1);
    assert_eq!(body["following_count"], 0);
}

#[tokio::test]
async fn deleting_anothers_post_is_forbidden() {
    let app = test_app(http_store());

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/posts/10")
        .header("x-user-id", VIEWER.to_string())
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// Keep the fixture builder honest about reaction kinds used above
#[test]
fn reaction_kind_wire_names() {
    assert_eq!(ReactionKind::Like.as_str(), "like");
    assert_eq!(ReactionKind::Boost.as_str(), "boost");
    assert_eq!(ReactionKind::Bookmark.as_str(), "bookmark");
}
