use crate::error::{Result, WatchLogError};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used in the first CSV column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One viewing session reported by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLogEntry {
    /// Days relative to today; -2 means two days ago
    pub days_offset: i64,
    pub service: String,
    pub title: String,
    /// Minutes watched
    pub watch_time: i64,
}

impl ViewLogEntry {
    /// Calendar date of the session relative to `today`, if representable
    pub fn date_from(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_signed(Duration::try_days(self.days_offset)?)
    }

    /// The CSV line for this entry, including the trailing newline.
    ///
    /// Fields are written verbatim, so commas inside a title end up as extra columns.
    pub fn to_csv_line(&self, today: NaiveDate) -> Result<String> {
        let date = self.date_from(today).ok_or_else(|| {
            WatchLogError::ExtractionError(format!("days_offset {} is out of range", self.days_offset))
        })?;

        Ok(format!(
            "{},{},{},{}\n",
            date.format(DATE_FORMAT),
            self.service,
            self.title,
            self.watch_time
        ))
    }
}
