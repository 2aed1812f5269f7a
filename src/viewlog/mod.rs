//! Viewing-log extraction and persistence.

pub mod entry;
pub mod extractor;
pub mod sink;

pub use entry::ViewLogEntry;
pub use extractor::{extract, Extraction};
pub use sink::CsvSink;

use crate::error::Result;
use tracing::{info, warn};

/// Extract entries from a model reply and append them to `sink`.
///
/// Returns the number of rows written. An empty array writes nothing and is not an error.
pub fn process_message(sink: &CsvSink, message: &str) -> Result<usize> {
    info!(message = message, "Processing message");

    let entries = extract(message).into_result()?;

    if entries.is_empty() {
        warn!(message = message, "No view data rows found");
        return Ok(0);
    }

    sink.append(&entries)
}
