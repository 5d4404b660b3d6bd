//! Constants used throughout the application.
//!
//! This module contains all constants used in daybook, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daybook";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A mood journal browsed through a month calendar";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Base URL of the persistence service.
pub const ENV_VAR_API_URL: &str = "DAYBOOK_API_URL";
/// API key sent with every persistence request.
pub const ENV_VAR_API_KEY: &str = "DAYBOOK_API_KEY";
/// Table holding journal entries.
pub const ENV_VAR_TABLE: &str = "DAYBOOK_TABLE";
/// First day of the calendar week (`sunday` or `monday`).
pub const ENV_VAR_WEEK_START: &str = "DAYBOOK_WEEK_START";
/// Selection policy on month navigation (`reset` or `keep`).
pub const ENV_VAR_MONTH_NAV: &str = "DAYBOOK_MONTH_NAV";
/// Default table name.
pub const DEFAULT_TABLE: &str = "journals";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Persistence
/// Path prefix of the REST endpoint, relative to the API URL.
pub const REST_PATH_PREFIX: &str = "rest/v1";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Format accepted for a month argument (YYYY-MM).
pub const MONTH_FORMAT: &str = "%Y-%m";
/// Clock time format sent to the persistence service.
pub const TIME_FORMAT_WIRE: &str = "%H:%M:%S";
/// Number of days in a calendar week.
pub const DAYS_PER_WEEK: usize = 7;

// Presentation
/// Characters of entry text shown in a card when there is no summary.
pub const PREVIEW_CHARS: usize = 100;
/// Shown in place of a date that could not be parsed.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";
/// Shown in place of a time that could not be parsed.
pub const INVALID_TIME_LABEL: &str = "Invalid Time";
/// Shown when an entry carries no time.
pub const NO_TIME_LABEL: &str = "No time recorded";
/// Emoji used for feelings outside the known vocabulary.
pub const FALLBACK_FEELING_EMOJI: &str = "📝";
