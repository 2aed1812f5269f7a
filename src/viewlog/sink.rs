use crate::error::Result;
use crate::viewlog::entry::ViewLogEntry;
use chrono::{Local, NaiveDate};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CSV_HEADER: &str = "date,service,title,watch_time\n";

/// Append-only CSV file holding the viewing log.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header row if it does not exist yet.
    ///
    /// Existing files are left untouched, whatever they contain.
    pub fn ensure_header(&self) -> Result<()> {
        match std::fs::metadata(&self.path) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut file = File::create(&self.path)?;
        file.write_all(CSV_HEADER.as_bytes())?;
        info!(path = %self.path.display(), "Created watch log");
        Ok(())
    }

    /// Append `entries` dated relative to the local current date.
    pub fn append(&self, entries: &[ViewLogEntry]) -> Result<usize> {
        self.append_on(entries, Local::now().date_naive())
    }

    /// Append `entries` dated relative to `today`.
    ///
    /// Stops at the first failed write; lines written before it stay in the file.
    pub fn append_on(&self, entries: &[ViewLogEntry], today: NaiveDate) -> Result<usize> {
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;

        for entry in entries {
            let line = entry.to_csv_line(today)?;
            debug!(line = %line.trim_end(), days_offset = entry.days_offset, "date set");
            file.write_all(line.as_bytes())?;
            info!(
                service = %entry.service,
                title = %entry.title,
                watch_time = entry.watch_time,
                "Wrote row to file"
            );
        }

        file.flush()?;
        Ok(entries.len())
    }
}
