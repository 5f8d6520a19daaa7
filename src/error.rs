//! Error types for the parser and the logger.

use std::path::PathBuf;

/// Why a date/time pair was rejected by the parser.
///
/// `OutOfRange` is the first check (upper bounds per component). The other
/// two variants come from the second check and share its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatetimeError {
    #[error("Invalid date or time provided (1).")]
    OutOfRange,

    #[error("Invalid date or time provided (2).")]
    InvalidCalendarDate,

    #[error("Invalid date or time provided (2).")]
    PastDate,
}

impl DatetimeError {
    /// 1 for the range check, 2 for the calendar/past check
    pub fn stage(&self) -> u8 {
        match self {
            DatetimeError::OutOfRange => 1,
            DatetimeError::InvalidCalendarDate | DatetimeError::PastDate => 2,
        }
    }
}

/// Failures while appending a line to the daily log file.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to log file {}: {source}", path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Returned when a string does not name a known log type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log type: {0}")]
pub struct ParseLogTypeError(pub String);
