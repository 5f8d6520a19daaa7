//! Date and time utility functions
//!
//! This module provides day-first date and 24h time formatting in a fixed
//! reference zone, coarse "time ago" labels, hour/minute differences, and a
//! strict parser that joins separate date and time inputs into one instant.

use crate::clock::{self, Clock};
use crate::config::DatetimeConfig;
use crate::constants::{
    DATE_FORMAT, DEFAULT_DATE_SEPARATOR, DEFAULT_MAX_YEARS_AHEAD, DEFAULT_TIME_SEPARATOR,
    LABEL_JUST_NOW, MAX_DAY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::error::DatetimeError;
use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Zone every formatted date is expressed in, whatever the host's zone is
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::Europe::Amsterdam;

/// A timestamp broken down for display
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDate {
    /// `DD-MM-YYYY`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// `DD-MM-YYYY HH:MM`
    pub full_date: String,
    /// The instant, expressed in the zone the fields were rendered in
    pub today: DateTime<Tz>,
}

/// Sub-day part of the distance between two instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDifference {
    pub hours: i64,
    pub minutes: i64,
}

/// Separators used by [`DatetimeParser`] to split its inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeOptions {
    pub date_separator: String,
    pub time_separator: String,
}

impl Default for DatetimeOptions {
    fn default() -> Self {
        Self {
            date_separator: DEFAULT_DATE_SEPARATOR.to_string(),
            time_separator: DEFAULT_TIME_SEPARATOR.to_string(),
        }
    }
}

impl DatetimeOptions {
    /// Separator between day, month and year; empty falls back to `/`
    pub fn date_separator(&self) -> &str {
        non_empty_or(&self.date_separator, DEFAULT_DATE_SEPARATOR)
    }

    /// Separator between hour and minute; empty falls back to `:`
    pub fn time_separator(&self) -> &str {
        non_empty_or(&self.time_separator, DEFAULT_TIME_SEPARATOR)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Format an instant in the reference zone
///
/// # Arguments
/// * `datetime` - Instant to format, the current one when `None`
/// * `_locale` - Preferred locale; only numeric fields are rendered, so it
///   never changes the output
///
/// # Returns
/// * `FormattedDate` - Zero-padded date and time strings plus the zoned instant
pub fn format_date(datetime: Option<DateTime<Utc>>, _locale: Option<&str>) -> FormattedDate {
    format_date_in(datetime.unwrap_or_else(|| clock::SystemClock.now()), REFERENCE_TIMEZONE)
}

/// Format an instant in an arbitrary zone
pub fn format_date_in(datetime: DateTime<Utc>, timezone: Tz) -> FormattedDate {
    let today = datetime.with_timezone(&timezone);

    let date = today.format(DATE_FORMAT).to_string();
    let time = format!(
        "{}:{}",
        format_time(i64::from(today.hour())),
        format_time(i64::from(today.minute()))
    );
    let full_date = format!("{} {}", date, time);

    FormattedDate {
        date,
        time,
        full_date,
        today,
    }
}

/// Pad an hour or minute component to two digits
///
/// Values below 10 get a leading zero; anything else is printed as is.
pub fn format_time(value: i64) -> String {
    if value < 10 {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}

/// Describe how long ago `date` was, relative to the current instant
pub fn format_time_ago(date: DateTime<Utc>) -> String {
    format_time_ago_at(date, clock::SystemClock.now())
}

/// Describe how long ago `date` was, relative to `now`
///
/// # Returns
/// * `String` - `"just now"`, `"<N>m ago"`, `"<N>h ago"` or `"<N>d ago"`
pub fn format_time_ago_at(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_milliseconds() as f64 / 1000.0;

    if seconds < SECONDS_PER_MINUTE {
        LABEL_JUST_NOW.to_string()
    } else if seconds < SECONDS_PER_HOUR {
        format!("{}m ago", (seconds / SECONDS_PER_MINUTE).floor() as i64)
    } else if seconds < SECONDS_PER_DAY {
        format!("{}h ago", (seconds / SECONDS_PER_HOUR).floor() as i64)
    } else {
        format!("{}d ago", (seconds / SECONDS_PER_DAY).floor() as i64)
    }
}

/// Hours and minutes between two instants, ignoring whole days
///
/// # Arguments
/// * `future` - The later instant
/// * `past` - The earlier instant
///
/// # Returns
/// * `DateDifference` - Hours left over after whole days, minutes rounded to
///   the nearest whole minute with a rounded 60 carried into the hours
pub fn format_difference(future: DateTime<Utc>, past: DateTime<Utc>) -> DateDifference {
    let within_day = (future - past).num_milliseconds() % MS_PER_DAY;

    let mut hours = within_day.div_euclid(MS_PER_HOUR);
    let mut minutes = round_half_up((within_day % MS_PER_HOUR) as f64 / MS_PER_MINUTE as f64);
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }

    DateDifference { hours, minutes }
}

/// Round to the nearest integer, halves towards positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert `DD-MM-YYYY` to `YYYY-MM-DD`
///
/// Components are only reordered, never validated.
pub fn format_to_iso(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    let part = |index: usize| parts.get(index).copied().unwrap_or("");

    format!("{}-{}-{}", part(2), part(1), part(0))
}

/// Parse a date and a time entered separately, using default options
///
/// See [`DatetimeParser::parse`] for the validation rules.
pub fn datetime_parser(
    raw_date: &str,
    raw_time: &str,
    options: Option<&DatetimeOptions>,
) -> Result<DateTime<Tz>, DatetimeError> {
    let parser = match options {
        Some(options) => DatetimeParser::new().with_options(options.clone()),
        None => DatetimeParser::new(),
    };
    parser.parse(raw_date, raw_time)
}

/// Joins a `day/month/year` and an `hour:minute` input into one instant
#[derive(Clone)]
pub struct DatetimeParser {
    options: DatetimeOptions,
    timezone: Tz,
    max_years_ahead: i32,
    clock: Arc<dyn Clock>,
}

impl Default for DatetimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DatetimeParser {
    pub fn new() -> Self {
        Self {
            options: DatetimeOptions::default(),
            timezone: REFERENCE_TIMEZONE,
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
            clock: clock::system(),
        }
    }

    /// Build a parser from the `[datetime]` configuration section
    pub fn from_config(config: &DatetimeConfig) -> anyhow::Result<Self> {
        Ok(Self::new()
            .with_options(config.options())
            .with_timezone(config.timezone()?)
            .with_max_years_ahead(config.max_years_ahead))
    }

    pub fn with_options(mut self, options: DatetimeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_max_years_ahead(mut self, years: i32) -> Self {
        self.max_years_ahead = years;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn options(&self) -> &DatetimeOptions {
        &self.options
    }

    /// Parse and validate a date/time pair
    ///
    /// # Arguments
    /// * `raw_date` - Day, month and year joined by the date separator
    /// * `raw_time` - Hour and minute joined by the time separator
    ///
    /// # Returns
    /// * `Ok(DateTime<Tz>)` - The instant, in the parser's zone
    /// * `Err(DatetimeError::OutOfRange)` - A component exceeds its upper bound
    /// * `Err(DatetimeError::InvalidCalendarDate)` - A component is missing or
    ///   not a number, or the date/time does not exist
    /// * `Err(DatetimeError::PastDate)` - The instant lies before now
    pub fn parse(&self, raw_date: &str, raw_time: &str) -> Result<DateTime<Tz>, DatetimeError> {
        let date_parts = split_components(raw_date, self.options.date_separator());
        let time_parts = split_components(raw_time, self.options.time_separator());

        let day = component(&date_parts, 0);
        let month = component(&date_parts, 1);
        let year = component(&date_parts, 2);
        let hour = component(&time_parts, 0);
        let minute = component(&time_parts, 1);

        let now = self.clock.now().with_timezone(&self.timezone);
        let max_year = i64::from(now.year()) + i64::from(self.max_years_ahead);

        // Only upper bounds here; zero, negatives and non-numbers pass through.
        let exceeds = |value: Option<i64>, max: i64| value.is_some_and(|v| v > max);
        if exceeds(day, MAX_DAY)
            || exceeds(month, MAX_MONTH)
            || exceeds(year, max_year)
            || exceeds(hour, MAX_HOUR)
            || exceeds(minute, MAX_MINUTE)
        {
            return Err(DatetimeError::OutOfRange);
        }

        let (Some(day), Some(month), Some(year), Some(hour), Some(minute)) = (day, month, year, hour, minute)
        else {
            return Err(DatetimeError::InvalidCalendarDate);
        };

        let naive = assemble(year, month, day, hour, minute).ok_or(DatetimeError::InvalidCalendarDate)?;
        let full_date = match self.timezone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => return Err(DatetimeError::InvalidCalendarDate),
        };

        if full_date < now {
            return Err(DatetimeError::PastDate);
        }

        Ok(full_date)
    }
}

fn split_components(raw: &str, separator: &str) -> Vec<Option<i64>> {
    raw.split(separator).map(parse_leading_int).collect()
}

fn component(parts: &[Option<i64>], index: usize) -> Option<i64> {
    parts.get(index).copied().flatten()
}

fn assemble(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year.try_into().ok()?, month.try_into().ok()?, day.try_into().ok()?)?;
    date.and_hms_opt(hour.try_into().ok()?, minute.try_into().ok()?, 0)
}

/// Read the integer at the start of `raw`, ignoring whatever follows it
///
/// Leading whitespace and a single sign are accepted. Returns `None` when no
/// digit follows; digit runs too long for `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}
