//! Repository traits

mod repositories;

pub use repositories::{
    FollowRepository, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
