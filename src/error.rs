//! Error types and result aliases for the watch log.
//!
//! This module defines the core error type [`WatchLogError`] and the [`Result`] type alias
//! used throughout the crate. Every fallible operation returns `Result<T>`; the conversation
//! loop decides which of these end a turn and which are only reported.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchLogError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid tool arguments: {0}")]
    ToolArguments(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Extraction error: {0}")]
    ExtractionError(String),
}

pub type Result<T> = std::result::Result<T, WatchLogError>;
