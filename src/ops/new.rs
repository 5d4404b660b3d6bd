//! Writing a new entry.

use crate::entry::{Feeling, JournalEntry};
use crate::errors::AppResult;
use crate::store::{EntryStore, NewEntry};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::info;

/// Saves a new entry, dated `now` unless a date or time is given.
///
/// The time is stored to the minute.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for empty text and any error from the
/// store.
pub fn create_entry(
    store: &dyn EntryStore,
    feeling: Feeling,
    text: &str,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    now: NaiveDateTime,
) -> AppResult<JournalEntry> {
    let time = time.unwrap_or_else(|| now.time());
    let time = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
    let entry = NewEntry::new(date.unwrap_or_else(|| now.date()), Some(time), feeling, text)?;

    let saved = store.insert_entry(&entry)?;
    info!("Saved entry {} for {}", saved.id, entry.date);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;
    use crate::errors::{AppError, PersistenceError};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        inserted: Mutex<Vec<NewEntry>>,
    }

    impl EntryStore for RecordingStore {
        fn query_entries(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<JournalEntry>, PersistenceError> {
            Ok(Vec::new())
        }

        fn get_entry(&self, _id: &EntryId) -> Result<Option<JournalEntry>, PersistenceError> {
            Ok(None)
        }

        fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry, PersistenceError> {
            self.inserted.lock().unwrap().push(entry.clone());
            let mut row = entry.to_row();
            row["id"] = json!(99);
            serde_json::from_value(row).map_err(|e| PersistenceError::InvalidResponse(e.to_string()))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 3)
            .unwrap()
            .and_hms_milli_opt(14, 5, 42, 500)
            .unwrap()
    }

    #[test]
    fn test_defaults_to_now_truncated_to_minute() {
        let store = RecordingStore::default();
        let saved = create_entry(&store, Feeling::Happy, "Sunny walk", None, None, now()).unwrap();

        assert_eq!(saved.id, EntryId::Number(99));
        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted[0].date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        assert_eq!(inserted[0].time, NaiveTime::from_hms_opt(14, 5, 0));
        assert_eq!(inserted[0].feeling, Feeling::Happy);
    }

    #[test]
    fn test_explicit_date_and_time() {
        let store = RecordingStore::default();
        let date = NaiveDate::from_ymd_opt(2025, 8, 30);
        let time = NaiveTime::from_hms_opt(7, 45, 0);
        create_entry(&store, Feeling::Tired, "Early start", date, time, now()).unwrap();

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(Some(inserted[0].date), date);
        assert_eq!(inserted[0].time, time);
    }

    #[test]
    fn test_empty_text_never_reaches_store() {
        let store = RecordingStore::default();
        let result = create_entry(&store, Feeling::Sad, "  ", None, None, now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(store.inserted.lock().unwrap().is_empty());
    }
}
