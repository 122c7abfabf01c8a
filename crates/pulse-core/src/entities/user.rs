//! User entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            display_name: None,
            avatar: None,
            bio: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Name to show in feeds: display name if set, else the username
    pub fn visible_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Reduce to the denormalized summary carried by feed candidates
    pub fn summary(&self) -> crate::entities::AuthorSummary {
        crate::entities::AuthorSummary {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
