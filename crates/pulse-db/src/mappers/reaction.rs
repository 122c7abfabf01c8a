//! Reaction model <-> entity mappers

use pulse_core::entities::{Reaction, ReactionKind};
use pulse_core::error::DomainError;
use pulse_core::value_objects::Snowflake;

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity
///
/// Fails on an unrecognized kind string; reaction rows are written through
/// [`ReactionKind::as_str`], so this only fires on corrupted data.
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = ReactionKind::parse(&model.kind)
            .ok_or_else(|| DomainError::InvalidReactionKind(model.kind.clone()))?;
        Ok(Reaction {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            kind,
            created_at: model.created_at,
        })
    }
}
