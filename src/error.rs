//! Error types for the net pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The deduction engine itself never fails for valid input; these errors come
//! from schedule loading, caller-side input validation and history lookups.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the net pay engine.
///
/// # Example
///
/// ```
/// use paye_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
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

    /// The deduction schedule parsed but is structurally unusable.
    #[error("Invalid deduction schedule: {message}")]
    InvalidSchedule {
        /// What is wrong with the schedule.
        message: String,
    },

    /// A calculation input was missing, non-numeric or negative.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No history entry exists with the given id.
    #[error("History entry not found: {id}")]
    EntryNotFound {
        /// The id that was looked up.
        id: Uuid,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
