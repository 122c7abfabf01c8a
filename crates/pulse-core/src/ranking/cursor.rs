//! Opaque pagination cursors
//!
//! Chronological cursors carry the last item's creation timestamp; ranked
//! cursors carry the last item's score and creation timestamp. Both are
//! base64-encoded on the wire. Decoding is deliberately lenient: any token
//! that does not parse is treated as "no cursor" and the feed restarts from
//! the newest items.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use std::cmp::Ordering;

use super::FeedMode;

/// Decoded pagination position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedCursor {
    /// Resume a chronological feed strictly before this timestamp
    Chronological { before: DateTime<Utc> },
    /// Resume a ranked feed strictly after this (score, created-at) position
    Ranked { score: f64, created_at_millis: i64 },
}

impl FeedCursor {
    /// Cursor pointing at the last item of a chronological page
    pub fn chronological(last_created_at: DateTime<Utc>) -> Self {
        Self::Chronological {
            before: last_created_at,
        }
    }

    /// Cursor pointing at the last item of a ranked page
    pub fn ranked(score: f64, created_at_millis: i64) -> Self {
        Self::Ranked {
            score,
            created_at_millis,
        }
    }

    /// Encode to the opaque wire token
    pub fn encode(&self) -> String {
        let payload = match self {
            Self::Chronological { before } => before.timestamp_millis().to_string(),
            Self::Ranked {
                score,
                created_at_millis,
            } => format!("{score:.4}_{created_at_millis}"),
        };
        URL_SAFE_NO_PAD.encode(payload)
    }

    /// Decode a wire token for the given feed mode
    ///
    /// Returns `None` for any malformed token; callers start from the newest
    /// items instead of rejecting the request.
    pub fn decode(mode: FeedMode, token: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
        let payload = String::from_utf8(bytes).ok()?;

        match mode {
            FeedMode::Following => {
                let millis = payload.parse::<i64>().ok()?;
                let before = Utc.timestamp_millis_opt(millis).single()?;
                Some(Self::Chronological { before })
            }
            FeedMode::ForYou => {
                let (score_part, millis_part) = payload.split_once('_')?;
                let score = score_part.parse::<f64>().ok()?;
                if !score.is_finite() {
                    return None;
                }
                let created_at_millis = millis_part.parse::<i64>().ok()?;
                Some(Self::Ranked {
                    score,
                    created_at_millis,
                })
            }
        }
    }

    /// For ranked cursors: whether an item at (score, created-at) comes
    /// strictly after this cursor in the (score desc, created-at desc) order
    pub fn admits_ranked(&self, score: f64, created_at_millis: i64) -> bool {
        match *self {
            Self::Ranked {
                score: cursor_score,
                created_at_millis: cursor_millis,
            } => match score.total_cmp(&cursor_score) {
                Ordering::Less => true,
                Ordering::Equal => created_at_millis < cursor_millis,
                Ordering::Greater => false,
            },
            Self::Chronological { .. } => true,
        }
    }
}
