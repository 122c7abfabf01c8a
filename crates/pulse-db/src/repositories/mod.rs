//! PostgreSQL repository implementations

pub mod error;

mod follow;
mod post;
mod reaction;
mod user;

pub use follow::PgFollowRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
