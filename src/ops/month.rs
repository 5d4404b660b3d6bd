//! One-shot month listing.

use crate::calendar::YearMonth;
use crate::config::Config;
use crate::errors::AppResult;
use crate::render::render_view;
use crate::store::EntryStore;
use crate::view::JournalView;
use chrono::NaiveDate;
use tracing::{debug, info};

/// What to list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthOptions {
    pub month: Option<YearMonth>,
    pub search: Option<String>,
    pub mood: Option<String>,
    /// Selects this day; its month wins over `month`.
    pub date: Option<NaiveDate>,
    pub today_only: bool,
    pub sort_confidence: bool,
}

/// Fetches a month and renders its calendar and filtered entries.
///
/// # Errors
///
/// Returns an error if the store cannot be queried. A one-shot listing has
/// no retry, so persistence failures are returned instead of being shown
/// inline.
pub fn month_report(
    store: &dyn EntryStore,
    config: &Config,
    options: &MonthOptions,
    today: NaiveDate,
) -> AppResult<String> {
    let mut view = match options.month {
        Some(month) => JournalView::at_month(month, config.week_start, config.month_nav),
        None => JournalView::new(today, config.week_start, config.month_nav),
    };

    // A month change hands back a ticket; the single fetch below supersedes it.
    let _moved = if options.today_only {
        view.show_today(today)
    } else if let Some(date) = options.date {
        view.select_date(date)
    } else {
        None
    };
    if let Some(query) = &options.search {
        view.set_query(query.clone());
    }
    if options.mood.is_some() {
        view.select_mood(options.mood.clone());
    }
    if options.sort_confidence {
        view.toggle_confidence_sort();
    }
    debug!("Month listing criteria: {:?}", view.criteria());

    let ticket = view.begin_fetch();
    info!("Listing entries for {}", ticket.month);
    let entries = store.month_entries(ticket.month)?;
    view.complete_fetch(ticket, Ok(entries));

    Ok(render_view(&view, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryId, JournalEntry};
    use crate::errors::{AppError, PersistenceError};
    use crate::store::NewEntry;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the requested range and answers with fixed rows.
    struct FixedStore {
        rows: Vec<JournalEntry>,
        fail: bool,
        ranges: Mutex<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl FixedStore {
        fn new(rows: Vec<JournalEntry>) -> Self {
            Self {
                rows,
                fail: false,
                ranges: Mutex::new(Vec::new()),
            }
        }
    }

    impl EntryStore for FixedStore {
        fn query_entries(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<JournalEntry>, PersistenceError> {
            self.ranges.lock().unwrap().push((start, end));
            if self.fail {
                return Err(PersistenceError::Rejected {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self.rows.clone())
        }

        fn get_entry(&self, _id: &EntryId) -> Result<Option<JournalEntry>, PersistenceError> {
            Ok(None)
        }

        fn insert_entry(&self, _entry: &NewEntry) -> Result<JournalEntry, PersistenceError> {
            Err(PersistenceError::InvalidResponse("read-only".to_string()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<JournalEntry> {
        serde_json::from_value(json!([
            {"id": 1, "date": "2025-09-03", "feeling": "happy", "text": "Work went well", "confidence_score": 40},
            {"id": 2, "date": "2025-09-03", "feeling": "sad", "text": "Missed the bus", "confidence_score": 90},
            {"id": 3, "date": "2025-09-19", "feeling": "happy", "text": "Picnic", "confidence_score": 70}
        ]))
        .unwrap()
    }

    #[test]
    fn test_report_queries_whole_month() {
        let store = FixedStore::new(rows());
        let report = month_report(&store, &Config::default(), &MonthOptions::default(), date(2025, 9, 19))
            .unwrap();

        assert_eq!(
            store.ranges.lock().unwrap().as_slice(),
            &[(date(2025, 9, 1), date(2025, 9, 30))]
        );
        assert!(report.contains("September 2025"));
        assert!(report.contains("Journal Entries - September 2025  (3 entries)"));
    }

    #[test]
    fn test_report_applies_filters() {
        let store = FixedStore::new(rows());
        let options = MonthOptions {
            month: Some(YearMonth::new(2025, 9).unwrap()),
            mood: Some("happy".to_string()),
            sort_confidence: true,
            ..MonthOptions::default()
        };
        let report = month_report(&store, &Config::default(), &options, date(2026, 1, 1)).unwrap();

        assert!(report.contains("(2 entries)"));
        let picnic = report.find("Picnic").unwrap();
        let work = report.find("Work went well").unwrap();
        assert!(picnic < work);
        assert!(!report.contains("Missed the bus"));
    }

    #[test]
    fn test_report_for_selected_date_uses_its_month() {
        let store = FixedStore::new(rows());
        let options = MonthOptions {
            month: Some(YearMonth::new(2025, 1).unwrap()),
            date: Some(date(2025, 9, 3)),
            ..MonthOptions::default()
        };
        let report = month_report(&store, &Config::default(), &options, date(2025, 9, 19)).unwrap();

        assert_eq!(
            store.ranges.lock().unwrap().as_slice(),
            &[(date(2025, 9, 1), date(2025, 9, 30))]
        );
        assert!(report.contains("(2 entries)"));
        assert!(!report.contains("Picnic"));
    }

    #[test]
    fn test_report_for_today_in_another_month_fetches_once() {
        let store = FixedStore::new(rows());
        let options = MonthOptions {
            month: Some(YearMonth::new(2025, 1).unwrap()),
            today_only: true,
            ..MonthOptions::default()
        };
        let report = month_report(&store, &Config::default(), &options, date(2025, 9, 19)).unwrap();

        assert_eq!(
            store.ranges.lock().unwrap().as_slice(),
            &[(date(2025, 9, 1), date(2025, 9, 30))]
        );
        assert!(report.contains("Picnic"));
        assert!(!report.contains("Missed the bus"));
    }

    #[test]
    fn test_report_propagates_store_failure() {
        let mut store = FixedStore::new(rows());
        store.fail = true;
        let result = month_report(&store, &Config::default(), &MonthOptions::default(), date(2025, 9, 19));
        assert!(matches!(
            result,
            Err(AppError::Persistence(PersistenceError::Rejected { status: 500, .. }))
        ));
    }
}
