use crate::calendar::YearMonth;
use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, LOG_FORMAT_JSON,
    LOG_FORMAT_TEXT,
};
use crate::entry::Feeling;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

/// A mood journal browsed through a month calendar
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print debug logs
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, global = true, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the calendar and entries of a month
    Month(MonthArgs),
    /// Print every detail of one entry
    Show(ShowArgs),
    /// Write a new entry
    New(NewArgs),
    /// Browse months interactively
    Browse(BrowseArgs),
}

#[derive(Args, Debug, Default)]
pub struct MonthArgs {
    /// Month to show (format: YYYY-MM); defaults to the current month
    #[clap(short = 'm', long)]
    pub month: Option<String>,

    /// Only entries whose text, feeling or summary contains this text
    #[clap(short = 's', long)]
    pub search: Option<String>,

    /// Only entries with exactly this feeling
    #[clap(long)]
    pub mood: Option<String>,

    /// Select a day and show only its entries (format: YYYY-MM-DD or YYYYMMDD)
    #[clap(short = 'd', long, conflicts_with = "today")]
    pub date: Option<String>,

    /// Show only today's entries
    #[clap(short = 't', long)]
    pub today: bool,

    /// Rank entries by confidence score, highest first
    #[clap(short = 'c', long)]
    pub sort_confidence: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entry id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Feeling: a picker number 0-4 (sad..excellent) or a feeling name
    #[clap(short = 'm', long)]
    pub mood: String,

    /// What happened
    #[clap(long)]
    pub text: String,

    /// Entry date (format: YYYY-MM-DD or YYYYMMDD); defaults to today
    #[clap(short = 'd', long)]
    pub date: Option<String>,

    /// Entry time (format: HH:MM); defaults to now
    #[clap(long)]
    pub time: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Month to open (format: YYYY-MM); defaults to the current month
    #[clap(short = 'm', long)]
    pub month: Option<String>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == LOG_FORMAT_JSON
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::InvalidInput(format!("Invalid date '{}': {}", raw, e)))
}

/// Parses a month, or returns `None` when no month was given.
pub fn parse_month(raw: Option<&str>) -> AppResult<Option<YearMonth>> {
    raw.map(str::parse::<YearMonth>).transpose()
}

/// Parses a clock time in HH:MM or HH:MM:SS format.
pub fn parse_time(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| AppError::InvalidInput(format!("Invalid time '{}': {}", raw, e)))
}

/// Resolves a mood argument: a picker number, or a feeling from the known
/// vocabulary.
pub fn parse_mood(raw: &str) -> AppResult<Feeling> {
    let raw = raw.trim();
    if let Ok(index) = raw.parse::<usize>() {
        return Feeling::from_picker_index(index).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Mood number must be between 0 and {}, got {}",
                Feeling::PICKER.len() - 1,
                index
            ))
        });
    }

    let feeling = Feeling::from(raw.to_lowercase());
    if feeling.is_known() {
        Ok(feeling)
    } else {
        let known: Vec<String> = Feeling::KNOWN
            .iter()
            .map(|feeling| feeling.as_str().to_string())
            .collect();
        Err(AppError::InvalidInput(format!(
            "Unknown mood '{}', expected one of: {}",
            raw,
            known.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_defaults() {
        let args = CliArgs::parse_from(vec!["daybook", "month"]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, "text");
        match args.command {
            Command::Month(month) => {
                assert!(month.month.is_none());
                assert!(month.search.is_none());
                assert!(month.mood.is_none());
                assert!(month.date.is_none());
                assert!(!month.today);
                assert!(!month.sort_confidence);
            }
            other => panic!("expected month, got {:?}", other),
        }
    }

    #[test]
    fn test_month_with_filters() {
        let args = CliArgs::parse_from(vec![
            "daybook", "month", "-m", "2025-09", "--search", "work", "--mood", "happy", "-c",
        ]);
        match args.command {
            Command::Month(month) => {
                assert_eq!(month.month.as_deref(), Some("2025-09"));
                assert_eq!(month.search.as_deref(), Some("work"));
                assert_eq!(month.mood.as_deref(), Some("happy"));
                assert!(month.sort_confidence);
            }
            other => panic!("expected month, got {:?}", other),
        }
    }

    #[test]
    fn test_date_conflicts_with_today() {
        let result =
            CliArgs::try_parse_from(vec!["daybook", "month", "--date", "2025-09-03", "--today"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(vec!["daybook", "show", "42", "-v", "--log-format", "json"]);
        assert!(args.verbose);
        assert!(args.json_logs());
        match args.command {
            Command::Show(show) => assert_eq!(show.id, "42"),
            other => panic!("expected show, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result = CliArgs::try_parse_from(vec!["daybook", "--log-format", "xml", "month"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_requires_mood_and_text() {
        assert!(CliArgs::try_parse_from(vec!["daybook", "new", "--text", "hi"]).is_err());
        let args =
            CliArgs::parse_from(vec!["daybook", "new", "-m", "2", "--text", "hi", "--time", "09:15"]);
        match args.command {
            Command::New(new) => {
                assert_eq!(new.mood, "2");
                assert_eq!(new.text, "hi");
                assert_eq!(new.time.as_deref(), Some("09:15"));
                assert!(new.date.is_none());
            }
            other => panic!("expected new, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(parse_date("2023-01-15").unwrap(), expected);
        assert_eq!(parse_date("20230115").unwrap(), expected);
        assert!(parse_date("invalid-date").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month(Some("2025-09")).unwrap(),
            Some(YearMonth::new(2025, 9).unwrap())
        );
        assert_eq!(parse_month(None).unwrap(), None);
        assert!(parse_month(Some("2025-13")).is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:05").unwrap(), NaiveTime::from_hms_opt(14, 5, 0).unwrap());
        assert_eq!(parse_time("07:30:15").unwrap(), NaiveTime::from_hms_opt(7, 30, 15).unwrap());
        assert!(parse_time("25:99").is_err());
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!(parse_mood("0").unwrap(), Feeling::Sad);
        assert_eq!(parse_mood("4").unwrap(), Feeling::Excellent);
        assert!(parse_mood("5").is_err());
        assert_eq!(parse_mood("Grateful").unwrap(), Feeling::Grateful);
        assert!(parse_mood("wistful").is_err());
    }
}
