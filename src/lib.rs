/*!
# Daybook

Daybook is a mood journal browsed through a month calendar. Entries carry a
date, an optional time, a feeling, and free text, and live in a REST service.
The library holds the browsing engine: a month grid builder, a composable
entry filter, and a journal view that ties them to month fetches.

## Core Features

- Month grids covering complete weeks, padded with adjacent-month days
- Text search, mood filter, day selection, and confidence ranking
- Month navigation that keeps the selected day consistent with the month
- Request tokens so late fetch responses never overwrite newer ones

## Architecture

- `calendar`: Month grid construction (pure)
- `filter`: Filter criteria and the filter engine (pure)
- `navigation`: Reference month and selected day
- `view`: The journal screen state machine
- `entry`: Entry model and lenient field parsing
- `store`: Persistence trait and the REST client
- `render`: Plain-text output
- `ops`: Operations behind the subcommands
- `cli`, `config`, `errors`, `constants`: Application plumbing

## Usage Example

```rust
use chrono::NaiveDate;
use daybook::calendar::WeekStart;
use daybook::navigation::{Direction, MonthNavPolicy};
use daybook::JournalView;

let today = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();
let mut view = JournalView::new(today, WeekStart::Sunday, MonthNavPolicy::default());

let ticket = view.begin_fetch();
view.complete_fetch(ticket, Ok(Vec::new()));
assert_eq!(view.calendar(today).len(), 35);

let next = view.navigate_month(Direction::Next);
assert_eq!(next.month.to_string(), "October 2025");
```
*/

/// Month grid construction
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Journal entry model
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Entry filtering and ranking
pub mod filter;
/// Calendar navigation state
pub mod navigation;
/// Operations behind the subcommands
pub mod ops;
/// Plain-text rendering
pub mod render;
/// Persistence of journal entries
pub mod store;
/// The journal screen state machine
pub mod view;

// Re-export important types for convenience
pub use calendar::{build_month_grid, CalendarDay, YearMonth};
pub use cli::CliArgs;
pub use config::Config;
pub use entry::{Feeling, JournalEntry};
pub use errors::{AppError, AppResult};
pub use filter::{apply_filters, FilterCriteria};
pub use store::{EntryStore, RestStore};
pub use view::JournalView;
