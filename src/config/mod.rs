//! Configuration management for the daybook application.
//!
//! This module loads and validates configuration from environment variables.
//! The persistence service URL and key are required; everything else has a
//! default.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_API_URL`: Root URL of the journal service (required)
//! - `DAYBOOK_API_KEY`: API key for the journal service (required)
//! - `DAYBOOK_TABLE`: Table holding the entries (defaults to `journals`)
//! - `DAYBOOK_WEEK_START`: `sunday` or `monday` (defaults to `sunday`)
//! - `DAYBOOK_MONTH_NAV`: `reset` or `keep`, the selected day after a month
//!   change (defaults to `reset`)

use crate::calendar::WeekStart;
use crate::constants::{
    DEFAULT_TABLE, ENV_VAR_API_KEY, ENV_VAR_API_URL, ENV_VAR_MONTH_NAV, ENV_VAR_TABLE,
    ENV_VAR_WEEK_START, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::navigation::MonthNavPolicy;
use crate::store::RestStore;
use reqwest::Url;
use std::env;
use std::fmt;

/// Configuration for the daybook application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
///
/// let config = Config {
///     api_url: "https://journal.example.com".to_string(),
///     api_key: "anon-key".to_string(),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use daybook::Config;
/// use std::env;
///
/// env::set_var("DAYBOOK_API_URL", "https://journal.example.com");
/// env::set_var("DAYBOOK_API_KEY", "anon-key");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.table, "journals");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Root URL of the journal service.
    pub api_url: String,

    /// API key sent with every request. Never printed.
    pub api_key: String,

    /// Table holding journal entries.
    pub table: String,

    /// First column of the calendar.
    pub week_start: WeekStart,

    /// Which day is selected after stepping to another month.
    pub month_nav: MonthNavPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &REDACTED_PLACEHOLDER)
            .field("table", &self.table)
            .field("week_start", &self.week_start)
            .field("month_nav", &self.month_nav)
            .finish()
    }
}

impl Default for Config {
    /// An unconfigured service with default presentation settings.
    fn default() -> Self {
        Config {
            api_url: String::new(),
            api_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
            week_start: WeekStart::default(),
            month_nav: MonthNavPolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables and validates it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - `DAYBOOK_API_URL` or `DAYBOOK_API_KEY` is missing
    /// - `DAYBOOK_WEEK_START` or `DAYBOOK_MONTH_NAV` has an unknown value
    /// - the loaded values fail [`Config::validate`]
    pub fn load() -> AppResult<Self> {
        let api_url = required_var(ENV_VAR_API_URL)?;
        let api_key = required_var(ENV_VAR_API_KEY)?;

        let table = env::var(ENV_VAR_TABLE)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let week_start = match env::var(ENV_VAR_WEEK_START) {
            Ok(raw) => raw
                .parse::<WeekStart>()
                .map_err(|e| AppError::Config(format!("{}: {}", ENV_VAR_WEEK_START, e)))?,
            Err(_) => WeekStart::default(),
        };

        let month_nav = match env::var(ENV_VAR_MONTH_NAV) {
            Ok(raw) => raw
                .parse::<MonthNavPolicy>()
                .map_err(|e| AppError::Config(format!("{}: {}", ENV_VAR_MONTH_NAV, e)))?,
            Err(_) => MonthNavPolicy::default(),
        };

        let config = Config {
            api_url: api_url.trim().to_string(),
            api_key,
            table,
            week_start,
            month_nav,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - the API URL is empty, unparsable, or not http(s)
    /// - the API key is empty
    /// - the table name is empty or contains characters other than ASCII
    ///   letters, digits and `_`
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::Config;
    ///
    /// let invalid = Config {
    ///     api_url: "ftp://journal.example.com".to_string(),
    ///     api_key: "anon-key".to_string(),
    ///     ..Config::default()
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.api_url.is_empty() {
            return Err(AppError::Config("API URL is empty".to_string()));
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", self.api_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "API URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("API key is empty".to_string()));
        }

        if self.table.is_empty()
            || !self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(AppError::Config(format!(
                "Table name '{}' must be non-empty and contain only letters, digits and '_'",
                self.table
            )));
        }

        Ok(())
    }

    /// The REST client for the configured service.
    pub fn store(&self) -> RestStore {
        RestStore::new(&self.api_url, &self.api_key, &self.table)
    }
}

fn required_var(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("{} is not set", name)))
}
