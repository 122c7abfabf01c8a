//! Application configuration structs
//!
//! Loads configuration from environment variables, read once at process
//! start. The feed section is the single source of truth for ranking
//! parameters; both feed modes consume the same values.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use pulse_core::ranking::{RankingConfig, ReactionWeights, ScoreWeights};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub feed: FeedConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u8,
}

/// Feed ranking configuration
///
/// Defaults reproduce the documented scoring contract: reaction weights
/// 1/3/2, score weights 0.4/0.3/0.3, a 2 hour early-reaction window, and a
/// 24 hour candidate window.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub like_weight: f64,
    pub boost_weight: f64,
    pub bookmark_weight: f64,
    pub reaction_score_weight: f64,
    pub decay_score_weight: f64,
    pub symbol_score_weight: f64,
    pub recent_reaction_window_secs: i64,
    pub max_candidate_age_secs: i64,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let ranking = RankingConfig::default();
        Self {
            like_weight: ranking.reaction_weights.like,
            boost_weight: ranking.reaction_weights.boost,
            bookmark_weight: ranking.reaction_weights.bookmark,
            reaction_score_weight: ranking.score_weights.reaction,
            decay_score_weight: ranking.score_weights.decay,
            symbol_score_weight: ranking.score_weights.symbol,
            recent_reaction_window_secs: ranking.recent_reaction_window.num_seconds(),
            max_candidate_age_secs: ranking.max_candidate_age.num_seconds(),
            default_page_size: ranking.default_page_size,
            max_page_size: ranking.max_page_size,
        }
    }
}

impl FeedConfig {
    /// Convert to the domain-layer ranking configuration
    #[must_use]
    pub fn ranking(&self) -> RankingConfig {
        RankingConfig {
            reaction_weights: ReactionWeights {
                like: self.like_weight,
                boost: self.boost_weight,
                bookmark: self.bookmark_weight,
            },
            score_weights: ScoreWeights {
                reaction: self.reaction_score_weight,
                decay: self.decay_score_weight,
                symbol: self.symbol_score_weight,
            },
            recent_reaction_window: chrono::Duration::seconds(self.recent_reaction_window_secs),
            max_candidate_age: chrono::Duration::seconds(self.max_candidate_age_secs),
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "pulse-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

/// Read an env var, falling back to `default` when unset or unparseable
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let feed_defaults = FeedConfig::default();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", default_max_connections()),
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", default_min_connections()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            feed: FeedConfig {
                like_weight: env_or("FEED_LIKE_WEIGHT", feed_defaults.like_weight),
                boost_weight: env_or("FEED_BOOST_WEIGHT", feed_defaults.boost_weight),
                bookmark_weight: env_or("FEED_BOOKMARK_WEIGHT", feed_defaults.bookmark_weight),
                reaction_score_weight: env_or(
                    "FEED_REACTION_SCORE_WEIGHT",
                    feed_defaults.reaction_score_weight,
                ),
                decay_score_weight: env_or("FEED_DECAY_SCORE_WEIGHT", feed_defaults.decay_score_weight),
                symbol_score_weight: env_or(
                    "FEED_SYMBOL_SCORE_WEIGHT",
                    feed_defaults.symbol_score_weight,
                ),
                recent_reaction_window_secs: env_or(
                    "FEED_RECENT_REACTION_WINDOW_SECS",
                    feed_defaults.recent_reaction_window_secs,
                ),
                max_candidate_age_secs: env_or(
                    "FEED_MAX_CANDIDATE_AGE_SECS",
                    feed_defaults.max_candidate_age_secs,
                ),
                default_page_size: env_or("FEED_DEFAULT_PAGE_SIZE", feed_defaults.default_page_size),
                max_page_size: env_or("FEED_MAX_PAGE_SIZE", feed_defaults.max_page_size),
            },
            snowflake: SnowflakeConfig {
                worker_id: env_or("WORKER_ID", 0),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
