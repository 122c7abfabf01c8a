//! Request and response DTOs

mod mappers;
mod requests;
mod responses;

pub use requests::{CreatePostRequest, UpdateProfileRequest};
pub use responses::{
    AuthorResponse, FeedItemResponse, FeedResponse, FollowResponse, HealthResponse, PostResponse,
    ReactionCountsResponse, ReactionToggleResponse, ReadinessResponse, ScoreBreakdownResponse,
    SymbolResponse, UserResponse,
};
