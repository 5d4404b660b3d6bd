//! Entry filtering and ranking.
//!
//! A `FilterCriteria` value describes the current search bar, mood filter,
//! date selection and ranking toggle. [`apply_filters`] turns a base list of
//! entries plus criteria into the visible list without touching the base.
//!
//! Criteria change only through [`FilterCriteria::reduce`], which maps the
//! current criteria and one [`FilterAction`] to the next criteria.

use crate::entry::JournalEntry;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

/// The active filters over a month of entries.
///
/// Membership predicates (`text_query`, `mood`, `date`) combine by AND. The
/// confidence sort runs last and is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring searched in text, feeling and summary.
    pub text_query: String,
    /// Exact, case-sensitive feeling value.
    pub mood: Option<String>,
    /// Calendar day the entry was written on.
    pub date: Option<NaiveDate>,
    /// Rank surviving entries by confidence, highest first.
    pub sort_by_confidence_desc: bool,
}

/// A single change to the filter criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetQuery(String),
    ClearQuery,
    SetMood(Option<String>),
    SetDate(Option<NaiveDate>),
    SetConfidenceSort(bool),
    ToggleConfidenceSort,
    /// Drops every filter, including the sort.
    ClearAll,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = query.into();
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn sorted_by_confidence(mut self) -> Self {
        self.sort_by_confidence_desc = true;
        self
    }

    /// The query for display. Whitespace-only queries are empty.
    pub fn effective_query(&self) -> &str {
        self.text_query.trim()
    }

    /// True when applying these criteria returns the base list unchanged.
    pub fn is_empty(&self) -> bool {
        self.effective_query().is_empty()
            && self.mood.is_none()
            && self.date.is_none()
            && !self.sort_by_confidence_desc
    }

    /// Returns the criteria that result from applying `action` to `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::filter::{FilterAction, FilterCriteria};
    ///
    /// let criteria = FilterCriteria::new()
    ///     .reduce(FilterAction::SetMood(Some("happy".to_string())))
    ///     .reduce(FilterAction::ToggleConfidenceSort);
    /// assert_eq!(criteria.mood.as_deref(), Some("happy"));
    /// assert!(criteria.sort_by_confidence_desc);
    ///
    /// let cleared = criteria.reduce(FilterAction::ClearAll);
    /// assert!(cleared.is_empty());
    /// ```
    pub fn reduce(self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetQuery(query) => Self {
                text_query: query,
                ..self
            },
            FilterAction::ClearQuery => Self {
                text_query: String::new(),
                ..self
            },
            FilterAction::SetMood(mood) => Self { mood, ..self },
            FilterAction::SetDate(date) => Self { date, ..self },
            FilterAction::SetConfidenceSort(on) => Self {
                sort_by_confidence_desc: on,
                ..self
            },
            FilterAction::ToggleConfidenceSort => Self {
                sort_by_confidence_desc: !self.sort_by_confidence_desc,
                ..self
            },
            FilterAction::ClearAll => Self::default(),
        }
    }

    /// Whether `entry` passes every membership predicate.
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        matches_query(entry, &self.text_query)
            && self
                .mood
                .as_deref()
                .map_or(true, |mood| entry.feeling.as_str() == mood)
            && self.date.map_or(true, |date| entry.is_on(date))
    }
}

/// Blank queries match everything; otherwise the query is matched as typed,
/// surrounding spaces included.
fn matches_query(entry: &JournalEntry, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    entry.text.to_lowercase().contains(&needle)
        || entry.feeling.as_str().to_lowercase().contains(&needle)
        || entry
            .summary
            .as_deref()
            .is_some_and(|summary| summary.to_lowercase().contains(&needle))
}

/// Derives the visible entries from `base` under `criteria`.
///
/// The result borrows from `base`, which is never reordered or modified.
/// With empty criteria the result is `base` in its original order.
///
/// # Examples
///
/// ```
/// use daybook::entry::JournalEntry;
/// use daybook::filter::{apply_filters, FilterCriteria};
///
/// let entries: Vec<JournalEntry> = serde_json::from_str(r#"[
///     {"id": 1, "date": "2025-09-01", "feeling": "happy", "text": "Shipped the work project", "confidence_score": 40},
///     {"id": 2, "date": "2025-09-02", "feeling": "tired", "text": "Long run", "confidence_score": 90}
/// ]"#).unwrap();
///
/// let hits = apply_filters(&entries, &FilterCriteria::new().with_query("WORK"));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].feeling.as_str(), "happy");
/// ```
pub fn apply_filters<'a>(
    base: &'a [JournalEntry],
    criteria: &FilterCriteria,
) -> Vec<&'a JournalEntry> {
    let mut visible: Vec<&JournalEntry> = base.iter().filter(|e| criteria.matches(e)).collect();

    if criteria.sort_by_confidence_desc {
        // sort_by is stable, so equal scores keep their fetch order.
        visible.sort_by(|a, b| b.rank_score().total_cmp(&a.rank_score()));
    }

    debug!(
        "Filtered {} entries down to {} (query={:?}, mood={:?}, date={:?}, ranked={})",
        base.len(),
        visible.len(),
        criteria.effective_query(),
        criteria.mood,
        criteria.date,
        criteria.sort_by_confidence_desc
    );
    visible
}

/// Entries written on `date`, in base order.
pub fn entries_on(base: &[JournalEntry], date: NaiveDate) -> Vec<&JournalEntry> {
    apply_filters(base, &FilterCriteria::new().with_date(date))
}

/// Whether any entry was written on `date`; drives the calendar's entry dot.
pub fn has_entry_on(base: &[JournalEntry], date: NaiveDate) -> bool {
    base.iter().any(|entry| entry.is_on(date))
}

/// Every date that has at least one entry, for marking a whole grid at once.
pub fn dates_with_entries(base: &[JournalEntry]) -> BTreeSet<NaiveDate> {
    base.iter().filter_map(|entry| entry.date.valid().copied()).collect()
}
