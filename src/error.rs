//! Error types for the leave ledger engine.
//!
//! Every precondition the ledger relies on is checked by a validating factory
//! and reported through [`EngineError`]. The monthly computation itself never
//! fails once its inputs have been constructed.

use thiserror::Error;

/// The main error type for the leave ledger engine.
///
/// # Example
///
/// ```
/// use leave_ledger::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/leave_settings.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/leave_settings.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave application violated one of its construction invariants.
    #[error("Invalid leave application '{application_id}': {message}")]
    InvalidApplication {
        /// The ID of the invalid application.
        application_id: String,
        /// A description of what made the application invalid.
        message: String,
    },

    /// A balance override record was invalid.
    #[error("Invalid balance override for month {month}: {message}")]
    InvalidOverride {
        /// The month the override was recorded against.
        month: u32,
        /// A description of what made the override invalid.
        message: String,
    },

    /// A month number outside 1..=12 was supplied.
    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidMonth {
        /// The rejected month number.
        month: u32,
    },

    /// A backing store failed to produce ledger inputs.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
