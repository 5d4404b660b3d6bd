//! Calendar navigation and day selection.
//!
//! `CalendarNavigation` holds the displayed month and the selected day number.
//! It changes only through [`CalendarNavigation::select_day`] and
//! [`CalendarNavigation::navigate_month`]; both keep month and day consistent
//! with each other, so a cross-month selection never leaves the day pointing
//! into the old month.

use crate::calendar::{build_month_grid_with, CalendarDay, WeekStart, YearMonth};
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use tracing::debug;

/// Direction of a month step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What happens to the selected day when the month changes by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthNavPolicy {
    /// Select day 1 of the new month.
    #[default]
    ResetToFirst,
    /// Keep the day number, clamped to the length of the new month.
    KeepDay,
}

impl FromStr for MonthNavPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" | "first" => Ok(MonthNavPolicy::ResetToFirst),
            "keep" => Ok(MonthNavPolicy::KeepDay),
            other => Err(format!(
                "Unknown month navigation policy '{}', expected 'reset' or 'keep'",
                other
            )),
        }
    }
}

/// Result of selecting a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The day was in the displayed month; only the day changed.
    SameMonth { date: NaiveDate },
    /// The day was in an adjacent month; month and day both moved.
    MonthChanged { month: YearMonth, date: NaiveDate },
}

impl Selection {
    pub fn date(&self) -> NaiveDate {
        match self {
            Selection::SameMonth { date } | Selection::MonthChanged { date, .. } => *date,
        }
    }

    pub fn month_changed(&self) -> bool {
        matches!(self, Selection::MonthChanged { .. })
    }
}

/// The displayed month and selected day of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNavigation {
    reference_month: YearMonth,
    selected_day: u32,
    policy: MonthNavPolicy,
}

impl CalendarNavigation {
    /// Starts on the month and day of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_policy(today, MonthNavPolicy::default())
    }

    pub fn with_policy(today: NaiveDate, policy: MonthNavPolicy) -> Self {
        Self {
            reference_month: YearMonth::of(today),
            selected_day: today.day(),
            policy,
        }
    }

    /// Starts on `month` with day 1 selected.
    pub fn at_month(month: YearMonth, policy: MonthNavPolicy) -> Self {
        Self {
            reference_month: month,
            selected_day: 1,
            policy,
        }
    }

    pub fn reference_month(&self) -> YearMonth {
        self.reference_month
    }

    pub fn selected_day(&self) -> u32 {
        self.selected_day
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.reference_month.date(self.selected_day)
    }

    pub fn policy(&self) -> MonthNavPolicy {
        self.policy
    }

    /// Selects the day shown in `cell`.
    pub fn select_day(&mut self, cell: &CalendarDay) -> Selection {
        self.select_date(cell.date)
    }

    /// Selects `date`, moving to its month first when it lies outside the
    /// displayed one.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use daybook::calendar::YearMonth;
    /// use daybook::navigation::CalendarNavigation;
    ///
    /// let mut nav = CalendarNavigation::new(NaiveDate::from_ymd_opt(2025, 9, 19).unwrap());
    /// let selection = nav.select_date(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
    ///
    /// assert!(selection.month_changed());
    /// assert_eq!(nav.reference_month(), YearMonth::new(2025, 10).unwrap());
    /// assert_eq!(nav.selected_day(), 3);
    /// ```
    pub fn select_date(&mut self, date: NaiveDate) -> Selection {
        let month = YearMonth::of(date);
        let selection = if month == self.reference_month {
            Selection::SameMonth { date }
        } else {
            Selection::MonthChanged { month, date }
        };

        self.reference_month = month;
        self.selected_day = date.day();

        debug!("Selected {} ({:?})", date, selection);
        selection
    }

    /// Moves the displayed month one step and applies the selection policy.
    /// Returns the new reference month.
    pub fn navigate_month(&mut self, direction: Direction) -> YearMonth {
        let month = match direction {
            Direction::Previous => self.reference_month.previous(),
            Direction::Next => self.reference_month.next(),
        };

        self.selected_day = match self.policy {
            MonthNavPolicy::ResetToFirst => 1,
            MonthNavPolicy::KeepDay => self.selected_day.min(month.days_in_month()),
        };
        self.reference_month = month;

        debug!(
            "Navigated {:?} to {} (selected day {})",
            direction, month, self.selected_day
        );
        month
    }

    /// The grid for the displayed month with the current selection marked.
    pub fn grid(&self, today: NaiveDate, week_start: WeekStart) -> Vec<CalendarDay> {
        build_month_grid_with(self.reference_month, self.selected_day, today, week_start)
    }
}
