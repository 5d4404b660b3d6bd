//! Month grid construction.
//!
//! This module contains pure calendar logic: the `YearMonth` value used as the
//! calendar's reference month and the grid builder that lays a month out as
//! complete weeks, padded with the tail of the previous month and the head of
//! the next one. Nothing here reads the clock; "today" is always an argument.

use crate::constants::{DATE_FORMAT_ISO, DAYS_PER_WEEK, MONTH_FORMAT};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;


/// A calendar month of a specific year.
///
/// Always valid: a `YearMonth` can only be built from a real date or a
/// checked year/month pair, so the grid builder never sees month 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a `YearMonth` from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the month is outside 1..=12 or the
    /// year is outside the supported calendar range.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::calendar::YearMonth;
    ///
    /// let september = YearMonth::new(2025, 9).unwrap();
    /// assert_eq!(september.days_in_month(), 30);
    /// assert!(YearMonth::new(2025, 13).is_err());
    /// ```
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| AppError::InvalidInput(format!("No such month: {}-{:02}", year, month)))
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// The date of `day` within this month, if the month has that many days.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month, rolling December into January of the next year.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The preceding month, rolling January into December of the previous year.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Full English month name, e.g. "September".
    pub fn month_name(&self) -> String {
        self.first.format("%B").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    /// Parses `YYYY-MM`; a full `YYYY-MM-DD` date is accepted and truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), DATE_FORMAT_ISO)
            .or_else(|_| NaiveDate::parse_from_str(s, DATE_FORMAT_ISO))
            .map(YearMonth::of)
            .map_err(|_| {
                AppError::InvalidInput(format!(
                    "Invalid month '{}', expected {}",
                    s,
                    MONTH_FORMAT.replace("%Y", "YYYY").replace("%m", "MM")
                ))
            })
    }
}

/// Which weekday occupies the first column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index (0..7) of `date` in a week starting on `self`.
    pub fn column_of(&self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }

    /// Single-letter column headings.
    pub fn labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        match self {
            WeekStart::Sunday => ["S", "M", "T", "W", "T", "F", "S"],
            WeekStart::Monday => ["M", "T", "W", "T", "F", "S", "S"],
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!(
                "Unknown week start '{}', expected 'sunday' or 'monday'",
                other
            )),
        }
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// Day-of-month of the cell's own month. For padding cells this belongs
    /// to the adjacent month, not the reference month.
    pub day: u32,
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Builds the grid for `month` with a Sunday-first week.
///
/// See [`build_month_grid_with`].
pub fn build_month_grid(month: YearMonth, selected_day: u32, today: NaiveDate) -> Vec<CalendarDay> {
    build_month_grid_with(month, selected_day, today, WeekStart::Sunday)
}

/// Builds the ordered cells for `month`, covering complete weeks.
///
/// The grid opens with the last days of the previous month (as many as the
/// first of the month is offset from `week_start`), continues with every day
/// of `month`, and is padded with the first days of the next month until its
/// length is a multiple of seven.
///
/// Only current-month cells can be today or selected. A `selected_day` past
/// the end of the month selects nothing.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::calendar::{build_month_grid, YearMonth};
///
/// let september = YearMonth::new(2025, 9).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();
/// let grid = build_month_grid(september, 19, today);
///
/// assert_eq!(grid.len(), 35);
/// assert_eq!(grid[0].day, 31); // Sunday, August 31
/// assert!(!grid[0].is_current_month);
/// ```
pub fn build_month_grid_with(
    month: YearMonth,
    selected_day: u32,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<CalendarDay> {
    let first = month.first_day();
    let leading = week_start.column_of(first) as usize;
    let filled = leading + month.days_in_month() as usize;
    let total = filled.div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

    let grid_start = first
        .checked_sub_days(Days::new(leading as u64))
        .unwrap_or(first);

    grid_start
        .iter_days()
        .take(total)
        .map(|date| {
            let is_current_month = month.contains(date);
            CalendarDay {
                day: date.day(),
                date,
                is_current_month,
                is_today: is_current_month && date == today,
                is_selected: is_current_month && date.day() == selected_day,
            }
        })
        .collect()
}

/// Splits grid cells into rows of seven.
pub fn weeks(cells: &[CalendarDay]) -> impl Iterator<Item = &[CalendarDay]> {
    cells.chunks(DAYS_PER_WEEK)
}
