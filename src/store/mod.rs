//! Persistence of journal entries.
//!
//! The journal view only needs three operations from storage, captured by
//! [`EntryStore`]. [`RestStore`] implements them against a PostgREST-style
//! HTTP endpoint.
//!
//! # Example
//!
//! ```no_run
//! use daybook::calendar::YearMonth;
//! use daybook::store::{EntryStore, RestStore};
//!
//! let store = RestStore::new("https://journal.example.com", "anon-key", "journals");
//! let entries = store.month_entries(YearMonth::new(2025, 9)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod rest;

pub use rest::RestStore;

use crate::calendar::YearMonth;
use crate::constants::{DATE_FORMAT_ISO, TIME_FORMAT_WIRE};
use crate::entry::{EntryId, Feeling, JournalEntry};
use crate::errors::{AppError, AppResult, PersistenceError};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};

/// Storage operations used by the journal.
pub trait EntryStore: Send + Sync {
    /// Entries dated within `start..=end`, newest `created_at` first.
    fn query_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>, PersistenceError>;

    /// One entry by id, or `None` if no such entry exists.
    fn get_entry(&self, id: &EntryId) -> Result<Option<JournalEntry>, PersistenceError>;

    /// Stores a new entry and returns it as the service saved it.
    fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry, PersistenceError>;

    /// Every entry of `month`.
    fn month_entries(&self, month: YearMonth) -> Result<Vec<JournalEntry>, PersistenceError> {
        self.query_entries(month.first_day(), month.last_day())
    }
}

/// An entry about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub feeling: Feeling,
    pub text: String,
}

impl NewEntry {
    /// Builds an entry, rejecting text that is empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use daybook::entry::Feeling;
    /// use daybook::store::NewEntry;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
    /// assert!(NewEntry::new(day, None, Feeling::Happy, "Went climbing").is_ok());
    /// assert!(NewEntry::new(day, None, Feeling::Happy, "   ").is_err());
    /// ```
    pub fn new(
        date: NaiveDate,
        time: Option<NaiveTime>,
        feeling: Feeling,
        text: impl Into<String>,
    ) -> AppResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Entry text cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            date,
            time,
            feeling,
            text: text.trim().to_string(),
        })
    }

    /// The row as sent to the service.
    pub fn to_row(&self) -> Value {
        json!({
            "date": self.date.format(DATE_FORMAT_ISO).to_string(),
            "time": self.time.map(|t| t.format(TIME_FORMAT_WIRE).to_string()),
            "feeling": self.feeling.as_str(),
            "text": self.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_trims_text() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let entry = NewEntry::new(day, None, Feeling::Grateful, "  Called mum \n").unwrap();
        assert_eq!(entry.text, "Called mum");
    }

    #[test]
    fn test_new_entry_rejects_blank_text() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let result = NewEntry::new(day, None, Feeling::Sad, "\t ");
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_to_row() {
        let entry = NewEntry {
            date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            time: NaiveTime::from_hms_opt(14, 5, 0),
            feeling: Feeling::Other("curious".to_string()),
            text: "Read about tides".to_string(),
        };
        assert_eq!(
            entry.to_row(),
            json!({
                "date": "2025-09-03",
                "time": "14:05:00",
                "feeling": "curious",
                "text": "Read about tides",
            })
        );

        let untimed = NewEntry { time: None, ..entry };
        assert_eq!(untimed.to_row()["time"], Value::Null);
    }
}
