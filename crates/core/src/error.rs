//! Error types for the timetable extraction library.

use thiserror::Error;

/// Primary error type for timetable extraction operations.
///
/// Structural anomalies (pages without tables, sparse grids, join misses)
/// are recovered locally and never surface here; only violations of the
/// grid's structural assumptions do.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A slot label in the grid header could not be parsed as
    /// `hour.minute-hour.minute`.
    #[error("malformed time slot label: {0:?}")]
    SlotFormat(String),
}

/// Convenience Result type alias for ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;
