//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{feed, health, posts, reactions, users};
use crate::state::AppState;

/// Create the main API router with all routes (health is composed separately
/// so probe routes stay outside the /api/v1 prefix)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(feed_routes())
        .merge(post_routes())
        .merge(user_routes())
}

/// Feed routes
fn feed_routes() -> Router<AppState> {
    Router::new().route("/feed", get(feed::get_feed))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/reactions/:kind", put(reactions::toggle_reaction))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/follow", put(users::follow_user))
        .route("/users/:user_id/follow", delete(users::unfollow_user))
}
