//! Runtime configuration assembled from the process environment.
//!
//! A `.env` file in the working directory is loaded first when present. Variables already set
//! in the environment win over the file.

use crate::error::{Result, WatchLogError};
use crate::llm::gateways::OpenAIConfig;
use crate::llm::CompletionConfig;
use crate::tvdb::TvdbConfig;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_FOLLOW_UP_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_LOG_FILE: &str = "watching_data.csv";

#[derive(Debug, Clone)]
pub struct WatchLogConfig {
    pub openai: OpenAIConfig,
    pub tvdb: TvdbConfig,
    /// Model for the first completion of a turn
    pub model: String,
    /// Model for the completion that follows a tool result
    pub follow_up_model: String,
    /// Sampling settings sent with every completion
    pub completion: CompletionConfig,
    pub log_file: PathBuf,
}

/// Parse an optional numeric variable. Unparseable values are logged and ignored.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

impl WatchLogConfig {
    /// Load `.env`, then read the environment.
    ///
    /// Fails when there is no `.env` file and `OPENAI_API_KEY` is not set either, since there
    /// is then no source for credentials at all.
    pub fn load() -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded environment file"),
            Err(e) => {
                if std::env::var("OPENAI_API_KEY").is_err() {
                    return Err(WatchLogError::ConfigError(format!(
                        "could not load .env file and OPENAI_API_KEY is not set: {}",
                        e
                    )));
                }
                warn!(error = %e, "No .env file loaded, using process environment");
            }
        }

        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let openai = OpenAIConfig {
            api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
            base_url: lookup("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        };

        let tvdb = TvdbConfig {
            token: lookup("TVDB_TOKEN").unwrap_or_default(),
            base_url: lookup("TVDB_API_ENDPOINT")
                .unwrap_or_else(|| "https://api4.thetvdb.com/v4".to_string()),
        };

        if tvdb.token.is_empty() {
            warn!("TVDB_TOKEN is not set, show lookups will be unauthorized");
        }

        let completion = CompletionConfig {
            temperature: parse_var(&lookup, "WATCHLOG_TEMPERATURE"),
            max_tokens: parse_var(&lookup, "WATCHLOG_MAX_TOKENS"),
        };

        Self {
            openai,
            tvdb,
            completion,
            model: lookup("WATCHLOG_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            follow_up_model: lookup("WATCHLOG_FOLLOW_UP_MODEL")
                .unwrap_or_else(|| DEFAULT_FOLLOW_UP_MODEL.to_string()),
            log_file: lookup("WATCHLOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
