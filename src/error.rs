//! Error types for the analytics engine

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when describing or resolving reporting periods
///
/// All variants indicate a malformed period descriptor (a programming or
/// input error), never a data condition: empty record sets, zero baselines
/// and the like are handled by guarded arithmetic and do not error.
#[derive(Error, Debug)]
pub enum Error {
    /// Quarter outside the 1-4 range
    #[error("Invalid quarter: {quarter} (expected 1-4)")]
    QuarterOutOfRange { quarter: u8 },

    /// Custom period whose start date falls after its end date
    #[error("Invalid custom range: start {start} is after end {end}")]
    InvertedCustomRange { start: NaiveDate, end: NaiveDate },

    /// Date string that could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
