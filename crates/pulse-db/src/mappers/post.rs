//! Post model <-> entity mappers

use pulse_core::entities::{AuthorSummary, Post, PostSymbol, SymbolKind};
use pulse_core::value_objects::Snowflake;

use crate::models::{CandidateRowModel, PostModel, PostSymbolModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
            reply_to: model.reply_to.map(Snowflake::new),
            hidden: model.hidden,
        }
    }
}

/// Convert PostSymbolModel to PostSymbol
///
/// An unrecognized kind string maps to `None` (the undefined-kind state)
/// rather than failing the whole read.
impl From<PostSymbolModel> for PostSymbol {
    fn from(model: PostSymbolModel) -> Self {
        PostSymbol {
            ticker: model.ticker,
            kind: model.kind.as_deref().and_then(SymbolKind::parse),
            exchange: model.exchange,
        }
    }
}

impl CandidateRowModel {
    /// Split a candidate row into its post and author parts
    pub fn into_parts(self) -> (Post, AuthorSummary) {
        let author = AuthorSummary {
            id: Snowflake::new(self.author_id),
            username: self.author_username,
            display_name: self.author_display_name,
            avatar: self.author_avatar,
        };
        let post = Post {
            id: Snowflake::new(self.id),
            author_id: author.id,
            content: self.content,
            created_at: self.created_at,
            reply_to: self.reply_to.map(Snowflake::new),
            hidden: self.hidden,
        };
        (post, author)
    }
}
