//! The journal screen as a state machine.
//!
//! `JournalView` owns one month of fetched entries (the base), the active
//! filters and the calendar navigation. Host events go in as method calls,
//! and the calendar grid plus the visible entries come out as derived values.
//!
//! Fetching is split in two so the caller decides where I/O happens:
//! [`JournalView::begin_fetch`] issues a [`FetchTicket`] carrying a fresh
//! request token, and [`JournalView::complete_fetch`] applies a response only
//! if its ticket is still the latest one. Responses for superseded requests are
//! dropped, whatever order they arrive in.

use crate::calendar::{CalendarDay, WeekStart, YearMonth};
use crate::entry::JournalEntry;
use crate::errors::PersistenceError;
use crate::filter::{apply_filters, dates_with_entries, has_entry_on, FilterAction, FilterCriteria};
use crate::navigation::{CalendarNavigation, Direction, MonthNavPolicy, Selection};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Identifies one month fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub month: YearMonth,
}

/// What `complete_fetch` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was current and replaced the base entries.
    Applied { count: usize },
    /// A newer fetch was issued after this one; the response was ignored.
    Stale,
    /// The fetch failed; the base entries are unchanged.
    Failed,
}

#[derive(Debug, Clone)]
pub struct JournalView {
    base: Vec<JournalEntry>,
    criteria: FilterCriteria,
    navigation: CalendarNavigation,
    week_start: WeekStart,
    last_token: u64,
    pending: Option<FetchTicket>,
    loaded_month: Option<YearMonth>,
    last_error: Option<String>,
}

impl JournalView {
    /// A view opened on the month of `today` with today selected.
    pub fn new(today: NaiveDate, week_start: WeekStart, policy: MonthNavPolicy) -> Self {
        Self::from_navigation(CalendarNavigation::with_policy(today, policy), week_start)
    }

    /// A view opened on `month` with day 1 selected.
    pub fn at_month(month: YearMonth, week_start: WeekStart, policy: MonthNavPolicy) -> Self {
        Self::from_navigation(CalendarNavigation::at_month(month, policy), week_start)
    }

    fn from_navigation(navigation: CalendarNavigation, week_start: WeekStart) -> Self {
        Self {
            base: Vec::new(),
            criteria: FilterCriteria::default(),
            navigation,
            week_start,
            last_token: 0,
            pending: None,
            loaded_month: None,
            last_error: None,
        }
    }

    // Fetch lifecycle

    /// Issues a fetch for the reference month. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_token += 1;
        let ticket = FetchTicket {
            token: self.last_token,
            month: self.navigation.reference_month(),
        };
        self.pending = Some(ticket);
        self.last_error = None;
        debug!("Fetch #{} issued for {}", ticket.token, ticket.month);
        ticket
    }

    /// Applies the response for `ticket` if it is still the latest request.
    ///
    /// A failed fetch keeps the previous base entries and records the error
    /// so the host can offer [`JournalView::retry`].
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<JournalEntry>, PersistenceError>,
    ) -> FetchOutcome {
        if ticket.token != self.last_token {
            debug!(
                "Discarding stale fetch #{} for {} (latest is #{})",
                ticket.token, ticket.month, self.last_token
            );
            return FetchOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(entries) => {
                let count = entries.len();
                info!("Loaded {} entries for {}", count, ticket.month);
                self.base = entries;
                self.loaded_month = Some(ticket.month);
                self.last_error = None;
                FetchOutcome::Applied { count }
            }
            Err(err) => {
                warn!("Fetch #{} for {} failed: {}", ticket.token, ticket.month, err);
                self.last_error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Re-issues the fetch for the reference month after a failure.
    /// Returns `None` when there is nothing to retry.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.last_error.is_none() {
            return None;
        }
        info!("Retrying fetch for {}", self.navigation.reference_month());
        Some(self.begin_fetch())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The month the base entries belong to, once a fetch has succeeded.
    pub fn loaded_month(&self) -> Option<YearMonth> {
        self.loaded_month
    }

    // Host events

    /// Selects the day in `cell` and filters to it. Selecting a padding cell
    /// moves to that cell's month, which requires a fetch.
    pub fn select_day(&mut self, cell: &CalendarDay) -> Option<FetchTicket> {
        let selection = self.navigation.select_day(cell);
        self.apply_selection(selection)
    }

    /// Like [`JournalView::select_day`] for a date typed in by the user.
    pub fn select_date(&mut self, date: NaiveDate) -> Option<FetchTicket> {
        let selection = self.navigation.select_date(date);
        self.apply_selection(selection)
    }

    fn apply_selection(&mut self, selection: Selection) -> Option<FetchTicket> {
        self.update(FilterAction::SetDate(Some(selection.date())));
        selection.month_changed().then(|| self.begin_fetch())
    }

    /// Steps the reference month and issues its fetch. Filters are kept.
    pub fn navigate_month(&mut self, direction: Direction) -> FetchTicket {
        self.navigation.navigate_month(direction);
        self.begin_fetch()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.update(FilterAction::SetQuery(query.into()));
    }

    pub fn clear_query(&mut self) {
        self.update(FilterAction::ClearQuery);
    }

    /// Filters to one feeling, or clears the mood filter with `None`.
    pub fn select_mood(&mut self, mood: Option<String>) {
        self.update(FilterAction::SetMood(mood));
    }

    pub fn toggle_confidence_sort(&mut self) {
        self.update(FilterAction::ToggleConfidenceSort);
    }

    /// Drops every filter so the whole month is visible.
    pub fn show_all(&mut self) {
        self.update(FilterAction::ClearAll);
    }

    /// Shows only today's entries, moving to today's month if needed.
    pub fn show_today(&mut self, today: NaiveDate) -> Option<FetchTicket> {
        self.update(FilterAction::ClearAll);
        self.select_date(today)
    }

    /// Applies a raw filter action.
    pub fn update(&mut self, action: FilterAction) {
        debug!("Filter action: {:?}", action);
        self.criteria = std::mem::take(&mut self.criteria).reduce(action);
    }

    // Derived outputs

    pub fn reference_month(&self) -> YearMonth {
        self.navigation.reference_month()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.navigation.selected_date()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn base_entries(&self) -> &[JournalEntry] {
        &self.base
    }

    /// Grid cells for the reference month.
    pub fn calendar(&self, today: NaiveDate) -> Vec<CalendarDay> {
        self.navigation.grid(today, self.week_start)
    }

    /// Base entries under the current filters.
    pub fn visible_entries(&self) -> Vec<&JournalEntry> {
        apply_filters(&self.base, &self.criteria)
    }

    /// Whether the calendar should mark `date` as having an entry.
    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        has_entry_on(&self.base, date)
    }

    /// Calendar cells paired with their entry flag.
    pub fn calendar_with_marks(&self, today: NaiveDate) -> Vec<(CalendarDay, bool)> {
        let marked = dates_with_entries(&self.base);
        self.calendar(today)
            .into_iter()
            .map(|cell| {
                let has_entry = marked.contains(&cell.date);
                (cell, has_entry)
            })
            .collect()
    }

    /// "1 entry" or "N entries" for the visible list.
    pub fn entry_count_label(&self) -> String {
        count_label(self.visible_entries().len())
    }

    /// Title of the entry list.
    pub fn heading(&self) -> String {
        let query = self.criteria.effective_query();
        if query.is_empty() {
            format!("Journal Entries - {}", self.reference_month())
        } else {
            format!("Search results for \"{}\"", query)
        }
    }
}

/// Pluralised entry count.
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", count)
    }
}
