//! daykit - small formatting helpers and a daily file logger
//!
//! This library provides display helpers for dates, times, numbers and
//! strings, a strict parser for separately entered dates and times, and a
//! logger that mirrors timestamped lines to stdout and a per-day file.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`utils`] - Date/time and text formatting helpers
//! * [`logger`] - Console and daily file logging
//! * [`config`] - Optional configuration file
//! * [`clock`] - Injectable source of the current instant

/// Injectable clock used by every time-dependent helper
pub mod clock;

/// Configuration module for the reference zone, parser and logger
pub mod config;

/// Formats, defaults and thresholds
pub mod constants;

/// Error types for the parser and the logger
pub mod error;

/// Console and daily file logging
pub mod logger;

/// Utility functions for date/time and text formatting
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DatetimeError, LoggerError, ParseLogTypeError};
pub use logger::{LogType, Logger};
