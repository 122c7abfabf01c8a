//! # pulse-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    CreatePostRequest, FeedItemResponse, FeedResponse, FollowResponse, HealthResponse,
    PostResponse, ReactionCountsResponse, ReactionToggleResponse, ReadinessResponse,
    ScoreBreakdownResponse, SymbolResponse, UpdateProfileRequest, UserResponse,
};
pub use services::{
    FeedService, FollowService, InterestService, PostService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
