//! Ticker symbol extraction from post text
//!
//! Runs once at post creation. `$`-prefixed cashtags are classified as STOCK
//! (or CRYPTO for known crypto tickers); bare ALL-CAPS tokens of 2-5 letters
//! are extracted but keep an undefined kind unless they match the known
//! crypto set. Ranking only ever compares tickers by string, so the
//! unclassified kind is carried through rather than guessed at.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::entities::{PostSymbol, SymbolKind};

/// Cap on symbol associations per post
pub const MAX_SYMBOLS_PER_POST: usize = 10;

static CASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z]{1,5})(?:\.([A-Za-z]{1,3}))?\b").expect("valid cashtag pattern")
});

static BARE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("valid bare token pattern"));

static KNOWN_CRYPTO: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "BTC", "ETH", "SOL", "XRP", "ADA", "DOGE", "DOT", "AVAX", "LINK", "LTC", "BNB", "ATOM",
        "UNI", "SHIB", "NEAR", "ARB",
    ]
    .into_iter()
    .collect()
});

// All-caps words that show up constantly in market chatter but are not tickers
const BARE_STOPWORDS: &[&str] = &[
    "THE", "AND", "FOR", "NOT", "ALL", "YOU", "ARE", "WAS", "BUY", "SELL", "HOLD", "NEW", "NOW",
    "CEO", "CFO", "IPO", "ETF", "EPS", "GDP", "SEC", "FED", "USA", "USD", "EUR", "IMO", "TLDR",
    "ATH", "YTD", "API",
];

/// Extract ticker symbols from post text
///
/// Cashtags are scanned first so an explicit `$TSLA` wins over a later bare
/// `TSLA`; duplicates keep their first occurrence. Output is capped at
/// [`MAX_SYMBOLS_PER_POST`].
pub fn extract_symbols(text: &str) -> Vec<PostSymbol> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut symbols: Vec<PostSymbol> = Vec::new();

    for captures in CASHTAG.captures_iter(text) {
        let ticker = captures[1].to_uppercase();
        if !seen.insert(ticker.clone()) {
            continue;
        }
        let kind = if KNOWN_CRYPTO.contains(ticker.as_str()) {
            SymbolKind::Crypto
        } else {
            SymbolKind::Stock
        };
        let exchange = captures.get(2).map(|m| m.as_str().to_uppercase());
        symbols.push(PostSymbol {
            ticker,
            kind: Some(kind),
            exchange,
        });
        if symbols.len() == MAX_SYMBOLS_PER_POST {
            return symbols;
        }
    }

    for found in BARE_TOKEN.find_iter(text) {
        let ticker = found.as_str().to_string();
        if BARE_STOPWORDS.contains(&ticker.as_str()) || seen.contains(&ticker) {
            continue;
        }
        seen.insert(ticker.clone());
        // Bare tokens are only classifiable when they match the crypto set;
        // anything else keeps an undefined kind
        let kind = KNOWN_CRYPTO
            .contains(ticker.as_str())
            .then_some(SymbolKind::Crypto);
        symbols.push(PostSymbol {
            ticker,
            kind,
            exchange: None,
        });
        if symbols.len() == MAX_SYMBOLS_PER_POST {
            break;
        }
    }

    symbols
}
