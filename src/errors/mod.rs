//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The calendar and filter engines never fail; everything here comes from
//! configuration, user input, or the persistence service.

use thiserror::Error;

/// Represents specific error cases that can occur when talking to the
/// persistence service.
///
/// All of these are recoverable from the user's point of view: the view keeps
/// its last good entries and offers a retry.
///
/// # Examples
///
/// ```
/// use daybook::errors::PersistenceError;
///
/// let error = PersistenceError::NotFound("42".to_string());
/// assert!(format!("{}", error).contains("42"));
/// ```
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The service could not be reached at all.
    #[error("Journal service unreachable: {0}. Check DAYBOOK_API_URL and your network connection.")]
    Offline(#[source] reqwest::Error),

    /// The requested entry does not exist.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("Journal service rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from journal service: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the daybook application.
///
/// # Examples
///
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Missing API URL".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing API URL");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that cannot be turned into a month, date, mood or entry.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Errors talking to the persistence service.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use daybook::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::InvalidInput("bad month".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
