//! Application services

mod context;
mod error;
mod feed;
mod follow;
mod interest;
mod post;
mod reaction;
mod user;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use follow::FollowService;
pub use interest::InterestService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use user::UserService;
