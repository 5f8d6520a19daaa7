//! Constants used throughout the crate
//!
//! This module centralizes format strings, defaults and thresholds so the
//! formatting helpers, the parser and the logger agree on them.

// Date/time formats
/// Day-first date format used for display and for daily log file names
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Hour and minute format used for display and log line prefixes
pub const TIME_FORMAT: &str = "%H:%M";

// Reference zone
pub const DEFAULT_TIMEZONE: &str = "Europe/Amsterdam";

// Parser defaults
pub const DEFAULT_DATE_SEPARATOR: &str = "/";
pub const DEFAULT_TIME_SEPARATOR: &str = ":";
/// How many years past the current one the parser still accepts
pub const DEFAULT_MAX_YEARS_AHEAD: i32 = 2;
/// Upper bound accepted for `max_years_ahead` in configuration
pub const MAX_YEARS_AHEAD_LIMIT: i32 = 100;

pub const MAX_DAY: i64 = 31;
pub const MAX_MONTH: i64 = 12;
pub const MAX_HOUR: i64 = 23;
pub const MAX_MINUTE: i64 = 59;

// Durations in milliseconds
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

// Relative time buckets, in seconds
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const LABEL_JUST_NOW: &str = "just now";

// Number abbreviation thresholds
pub const MILLION: f64 = 1e6;
pub const THOUSAND: f64 = 1e3;

// Tickets
pub const TICKET_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_TICKET_LENGTH: usize = 8;

// Logger
/// Log directory, resolved against the working directory when relative
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_EXTENSION: &str = "log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_APPEND_FAILED: &str = "Error appending to log file.";

// Config discovery
pub const CONFIG_FILE_NAME: &str = "daykit.toml";
pub const CONFIG_DIR_NAME: &str = "daykit";
pub const CONFIG_DIR_FILE_NAME: &str = "config.toml";
