//! Pulls viewing-log entries out of a model reply.
//!
//! Extraction runs in two stages: fence removal, then strict JSON decoding. Each stage has
//! its own failure variant in [`Extraction`] so callers can tell them apart.

use crate::error::{Result, WatchLogError};
use crate::viewlog::entry::ViewLogEntry;

const FENCE: &str = "```";

/// Outcome of extracting entries from a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Entries(Vec<ViewLogEntry>),
    FenceError,
    JsonError(String),
}

impl Extraction {
    /// Collapse into a `Result`, mapping both failure variants to `ExtractionError`.
    pub fn into_result(self) -> Result<Vec<ViewLogEntry>> {
        match self {
            Extraction::Entries(entries) => Ok(entries),
            Extraction::FenceError => {
                Err(WatchLogError::ExtractionError("could not parse message".to_string()))
            }
            Extraction::JsonError(e) => {
                Err(WatchLogError::ExtractionError(format!("failed to unmarshal: {}", e)))
            }
        }
    }
}

/// Strip the code fence from `message`.
///
/// Text without a fence is returned unchanged. A single fence marker yields `None`, as does
/// a run of four or five backticks where the first and last markers overlap.
pub fn strip_fences(message: &str) -> Option<&str> {
    let (Some(start), Some(end)) = (message.find(FENCE), message.rfind(FENCE)) else {
        return Some(message);
    };

    if end < start + FENCE.len() {
        return None;
    }

    let inner = message[start + FENCE.len()..end].trim();
    Some(inner.strip_prefix("json").unwrap_or(inner).trim_start())
}

/// Run both stages on a raw model reply.
pub fn extract(message: &str) -> Extraction {
    let Some(body) = strip_fences(message) else {
        return Extraction::FenceError;
    };

    match serde_json::from_str::<Vec<ViewLogEntry>>(body) {
        Ok(entries) => Extraction::Entries(entries),
        Err(e) => Extraction::JsonError(e.to_string()),
    }
}
