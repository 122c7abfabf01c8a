//! Domain entities

mod follow;
mod post;
mod reaction;
mod user;

pub use follow::Follow;
pub use post::{
    AuthorSummary, FeedCandidate, Post, PostSymbol, PostWithSymbols, SymbolKind, MAX_POST_LENGTH,
};
pub use reaction::{Reaction, ReactionCounts, ReactionKind, ReactionWithSymbols};
pub use user::User;
