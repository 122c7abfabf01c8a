//! Request extractors

mod auth;
mod feed_query;
mod validated;

pub use auth::{AuthUser, USER_ID_HEADER};
pub use feed_query::FeedQuery;
pub use validated::ValidatedJson;
