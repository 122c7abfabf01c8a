//! Follow entity - a directed edge in the social graph

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Follow edge: follower -> followee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Snowflake,
    pub followee_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a new Follow edge
    pub fn new(follower_id: Snowflake, followee_id: Snowflake, created_at: DateTime<Utc>) -> Self {
        Self {
            follower_id,
            followee_id,
            created_at,
        }
    }

    /// A user cannot follow themselves
    #[inline]
    pub fn is_self_follow(&self) -> bool {
        self.follower_id == self.followee_id
    }
}
