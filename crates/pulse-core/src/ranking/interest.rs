//! Interest profile - per-request ranked ticker list
//!
//! Derived from the user's recent activity and discarded with the request.
//! Construction is pure; the bounded fetches feeding it live in the service
//! layer.

use std::collections::HashMap;

/// Weight added per symbol occurrence in the user's own posts
pub const OWN_POST_SYMBOL_WEIGHT: i64 = 3;

/// Weight added per symbol occurrence in posts the user reacted to
pub const REACTED_POST_SYMBOL_WEIGHT: i64 = 1;

/// Maximum tickers kept in a profile
pub const MAX_INTEREST_SYMBOLS: usize = 10;

/// How far back own posts are considered
pub const INTEREST_LOOKBACK_DAYS: i64 = 7;

/// Bound on own posts fed into the profile
pub const MAX_OWN_POSTS: i64 = 20;

/// Bound on reactions fed into the profile
pub const MAX_REACTED_POSTS: i64 = 50;

/// Ranked list of up to [`MAX_INTEREST_SYMBOLS`] tickers the user engages with
///
/// An empty profile is a valid state (new or inactive users) and makes the
/// symbol match sub-score contribute zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterestProfile {
    tickers: Vec<String>,
}

impl InterestProfile {
    /// The empty profile
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a profile directly from an ordered ticker list (normalized
    /// uppercase, truncated)
    pub fn from_tickers(tickers: Vec<String>) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(tickers.len().min(MAX_INTEREST_SYMBOLS));
        for ticker in tickers {
            let upper = ticker.to_uppercase();
            if !normalized.contains(&upper) {
                normalized.push(upper);
            }
            if normalized.len() == MAX_INTEREST_SYMBOLS {
                break;
            }
        }
        Self { tickers: normalized }
    }

    /// Accumulate weighted ticker occurrences and keep the top tickers
    ///
    /// Ties sort in first-seen order: own-post symbols are folded in before
    /// reacted-post symbols, and the stable sort preserves that order, so the
    /// result is deterministic for a given input set.
    pub fn build<'a, O, R>(own_post_tickers: O, reacted_post_tickers: R) -> Self
    where
        O: IntoIterator<Item = &'a str>,
        R: IntoIterator<Item = &'a str>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut weights: HashMap<String, i64> = HashMap::new();

        for ticker in own_post_tickers {
            accumulate(&mut order, &mut weights, ticker, OWN_POST_SYMBOL_WEIGHT);
        }
        for ticker in reacted_post_tickers {
            accumulate(&mut order, &mut weights, ticker, REACTED_POST_SYMBOL_WEIGHT);
        }

        let mut entries: Vec<(String, i64)> = order
            .into_iter()
            .map(|ticker| {
                let weight = weights.get(&ticker).copied().unwrap_or(0);
                (ticker, weight)
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(MAX_INTEREST_SYMBOLS);

        Self {
            tickers: entries.into_iter().map(|(ticker, _)| ticker).collect(),
        }
    }

    /// Whether the profile contains a ticker (callers pass normalized tickers)
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Number of tickers in the profile
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Whether the profile is empty
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// The ranked tickers, strongest first
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }
}

fn accumulate(order: &mut Vec<String>, weights: &mut HashMap<String, i64>, ticker: &str, weight: i64) {
    let key = ticker.to_uppercase();
    match weights.get_mut(&key) {
        Some(existing) => *existing += weight,
        None => {
            weights.insert(key.clone(), weight);
            order.push(key);
        }
    }
}
