//! API request handlers

pub mod feed;
pub mod health;
pub mod posts;
pub mod reactions;
pub mod users;
