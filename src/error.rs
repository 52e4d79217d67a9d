//! Error types for the child support worksheet engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only structural and validation failures are errors; advisory conditions
//! such as an income above the top of the schedule are reported as data on
//! the calculation result instead.

use thiserror::Error;

use crate::models::CustodyType;

/// The main error type for the worksheet engine.
///
/// # Example
///
/// ```
/// use support_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedChildCount { count: 9 };
/// assert_eq!(error.to_string(), "Schedule has no obligation column for 9 children");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Schedule file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Schedule file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The schedule table violates its structural invariants.
    #[error("Invalid schedule table: {message}")]
    InvalidSchedule {
        /// A description of the violated invariant.
        message: String,
    },

    /// The schedule has no column for the requested number of children.
    #[error("Schedule has no obligation column for {count} children")]
    UnsupportedChildCount {
        /// The requested child count.
        count: u32,
    },

    /// A worksheet pipeline was invoked for a case of the wrong custody type.
    #[error("Worksheet requires {expected} custody but the case is {actual}")]
    CustodyMismatch {
        /// The custody type the pipeline handles.
        expected: CustodyType,
        /// The custody type of the case passed in.
        actual: CustodyType,
    },

    /// A case record was invalid or contained inconsistent data.
    #[error("Invalid case field '{field}': {message}")]
    InvalidCase {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A monetary amount left the range `Decimal` can represent.
    #[error("Amount out of range while computing {operation}")]
    AmountOutOfRange {
        /// The computation that overflowed.
        operation: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
