//! Request DTOs
//!
//! Validated with the `validator` crate before any service logic runs.

use serde::Deserialize;
use validator::Validate;

use pulse_core::Snowflake;

/// Create a new post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post body; symbols are extracted from it server-side
    #[validate(length(min = 1, max = 500, message = "content must be 1-500 characters"))]
    pub content: String,

    /// Post being replied to, if any
    #[serde(default)]
    pub reply_to: Option<Snowflake>,
}

/// Update the caller's profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 64, message = "display_name must be at most 64 characters"))]
    #[serde(default)]
    pub display_name: Option<String>,

    #[validate(length(max = 280, message = "bio must be at most 280 characters"))]
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}
