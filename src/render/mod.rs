//! Plain-text rendering of the calendar and entries.
//!
//! Everything here returns `String`s; printing is left to the caller so the
//! output can be tested directly.

use crate::calendar::{weeks, CalendarDay, WeekStart, YearMonth};
use crate::constants::{
    INVALID_DATE_LABEL, INVALID_TIME_LABEL, NO_TIME_LABEL, PREVIEW_CHARS,
};
use crate::entry::{Insights, JournalEntry, Lenient};
use crate::filter::FilterCriteria;
use crate::view::JournalView;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use std::fmt::Write;

const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";
const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const CLOCK_FORMAT: &str = "%-I:%M %p";
const CELL_WIDTH: usize = 5;
const CALENDAR_LEGEND: &str = "[ ] selected  ( ) today  • has entries";

/// "Sep 3, 2025"
pub fn short_date(date: &Lenient<NaiveDate>) -> String {
    match date.valid() {
        Some(d) => d.format(SHORT_DATE_FORMAT).to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// "Wednesday, September 3, 2025"
pub fn long_date(date: &Lenient<NaiveDate>) -> String {
    match date.valid() {
        Some(d) => d.format(LONG_DATE_FORMAT).to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// "2:05 PM", or a placeholder when the entry has no usable time.
pub fn time_label(time: Option<&Lenient<NaiveTime>>) -> String {
    match time {
        None => NO_TIME_LABEL.to_string(),
        Some(Lenient::Valid(t)) => t.format(CLOCK_FORMAT).to_string(),
        Some(Lenient::Invalid(_)) => INVALID_TIME_LABEL.to_string(),
    }
}

fn created_label(created_at: &Lenient<DateTime<FixedOffset>>) -> String {
    match created_at.valid() {
        Some(ts) => format!(
            "{} at {}",
            ts.format(SHORT_DATE_FORMAT),
            ts.format(CLOCK_FORMAT)
        ),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// The summary if there is one, otherwise the start of the text.
///
/// # Examples
///
/// ```
/// use daybook::entry::JournalEntry;
/// use daybook::render::preview;
///
/// let entry: JournalEntry = serde_json::from_str(
///     r#"{"id": 1, "text": "Short note"}"#,
/// ).unwrap();
/// assert_eq!(preview(&entry), "Short note");
/// ```
pub fn preview(entry: &JournalEntry) -> String {
    if let Some(summary) = &entry.summary {
        return summary.clone();
    }
    if entry.char_count() > PREVIEW_CHARS {
        let head: String = entry.text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        entry.text.clone()
    }
}

fn confidence_label(score: f64) -> String {
    format!("{:.0}%", score)
}

/// One calendar cell: brackets for the selection, parentheses for today,
/// and a dot when the day has entries.
fn calendar_cell(cell: &CalendarDay, has_entry: bool) -> String {
    if !cell.is_current_month {
        return format!(" {:>2}  ", cell.day);
    }
    let (open, close) = if cell.is_selected {
        ('[', ']')
    } else if cell.is_today {
        ('(', ')')
    } else {
        (' ', ' ')
    };
    let dot = if has_entry { '•' } else { ' ' };
    format!("{}{:>2}{}{}", open, cell.day, close, dot)
}

/// The month grid with a title, weekday header and legend.
pub fn render_calendar(
    month: YearMonth,
    cells: &[(CalendarDay, bool)],
    week_start: WeekStart,
) -> String {
    let width = CELL_WIDTH * week_start.labels().len();
    let mut out = String::new();

    let _ = writeln!(out, "{:^width$}", month.to_string(), width = width);
    for label in week_start.labels() {
        let _ = write!(out, " {:>2}  ", label);
    }
    out.push('\n');

    let plain: Vec<CalendarDay> = cells.iter().map(|(cell, _)| *cell).collect();
    let mut marks = cells.iter().map(|(_, has_entry)| *has_entry);
    for week in weeks(&plain) {
        for cell in week {
            let has_entry = marks.next().unwrap_or(false);
            out.push_str(&calendar_cell(cell, has_entry));
        }
        out.push('\n');
    }

    out.push_str(CALENDAR_LEGEND);
    out.push('\n');
    out
}

/// A compact card for the entry list.
pub fn render_card(entry: &JournalEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  ·  {}  ·  {}  (#{})",
        entry.feeling.emoji(),
        entry.feeling,
        short_date(&entry.date),
        time_label(entry.time.as_ref()),
        entry.id
    );
    let _ = writeln!(out, "   {}", preview(entry));
    if let Some(score) = entry.confidence_score {
        let _ = writeln!(out, "   Confidence: {}", confidence_label(score));
    }
    out
}

/// Every field of one entry.
pub fn render_detail(entry: &JournalEntry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", long_date(&entry.date));
    let _ = writeln!(out, "{}", time_label(entry.time.as_ref()));
    let _ = writeln!(out, "{} {}", entry.feeling.emoji(), entry.feeling);
    if let Some(score) = entry.confidence_score {
        let _ = writeln!(out, "Confidence Score: {}", confidence_label(score));
    }

    let _ = writeln!(out, "\nYour Thoughts\n{}", entry.text);

    if let Some(summary) = &entry.summary {
        let _ = writeln!(out, "\nAI Summary\n{}", summary);
    }

    if let Some(emotions) = entry.emotions.as_ref().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "\nEmotions Detected");
        let line: Vec<String> = emotions
            .iter()
            .map(|(name, intensity)| format!("{}: {}%", name, (intensity * 100.0).round()))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }

    if let Some(insights) = &entry.insights {
        let _ = writeln!(out, "\nInsights");
        match insights {
            Insights::List(items) => {
                for item in items {
                    let _ = writeln!(out, "- {}", item);
                }
            }
            Insights::Text(text) => {
                let _ = writeln!(out, "{}", text);
            }
            Insights::Other(value) => {
                let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                let _ = writeln!(out, "{}", pretty);
            }
        }
    }

    let _ = writeln!(out, "\nEntry Statistics");
    let _ = writeln!(out, "Words: {}", entry.word_count());
    let _ = writeln!(out, "Characters: {}", entry.char_count());
    let _ = writeln!(
        out,
        "Confidence: {}",
        entry
            .confidence_score
            .map(confidence_label)
            .unwrap_or_else(|| "N/A".to_string())
    );

    if let Some(created_at) = &entry.created_at {
        let _ = writeln!(out, "\nCreated: {}", created_label(created_at));
    }

    out
}

/// What to show when the filtered list is empty.
pub fn empty_message(criteria: &FilterCriteria) -> String {
    let query = criteria.effective_query();
    if !query.is_empty() {
        format!("No entries match \"{}\"", query)
    } else if let Some(mood) = &criteria.mood {
        format!("No {} entries", mood)
    } else if let Some(date) = criteria.date {
        format!("No entries on {}", date.format(SHORT_DATE_FORMAT))
    } else {
        "No journal entries for this month".to_string()
    }
}

/// The whole journal screen: calendar, list heading, and entry cards.
pub fn render_view(view: &JournalView, today: NaiveDate) -> String {
    let mut out = render_calendar(
        view.reference_month(),
        &view.calendar_with_marks(today),
        view.week_start(),
    );

    if let Some(error) = view.last_error() {
        let _ = writeln!(out, "\n! {}", error);
        let _ = writeln!(out, "! Press r to retry.");
    }

    let visible = view.visible_entries();
    let _ = writeln!(out, "\n{}  ({})", view.heading(), view.entry_count_label());

    if visible.is_empty() {
        let _ = writeln!(out, "{}", empty_message(view.criteria()));
    }
    for entry in visible {
        out.push('\n');
        out.push_str(&render_card(entry));
    }
    out
}
