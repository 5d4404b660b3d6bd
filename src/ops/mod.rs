//! High-level operations behind the command-line subcommands.
//!
//! Each operation takes its store and the current date as arguments and
//! returns the text to print, so the binary only does argument parsing,
//! logging setup, and output.

pub mod browse;
pub mod month;
pub mod new;
pub mod show;

// Re-export commonly used functions
pub use browse::{browse_month, run_browser, BrowseCommand};
pub use month::{month_report, MonthOptions};
pub use new::create_entry;
pub use show::show_entry;
