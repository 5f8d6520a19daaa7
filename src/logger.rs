//! Daily file logger
//!
//! Every line goes to stdout and is appended to `<directory>/<DD-MM-YYYY>.log`,
//! where the date is today's in the reference zone. The directory is created
//! on demand, one level deep.
//!
//! [`Logger::log_data`] and [`Logger::log_error`] are best effort: a failed
//! append is reported on stderr and dropped. Callers that need to react to
//! failures use [`Logger::write`], [`Logger::write_async`] or
//! [`Logger::spawn_write`], which return the error instead.

use crate::clock::{self, Clock};
use crate::config::{DatetimeConfig, LoggingConfig};
use crate::constants::{DEFAULT_LOG_DIR, LOG_APPEND_FAILED, LOG_FILE_EXTENSION};
use crate::error::{LoggerError, ParseLogTypeError};
use crate::utils::datetime::{format_date_in, FormattedDate, REFERENCE_TIMEZONE};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;

/// Kind of message, rendered upper-case in brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    Warning,
    Alert,
    Info,
    Success,
    /// Raw message, no time or type prefix
    None,
    Fatal,
    Error,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Warning => "warning",
            LogType::Alert => "alert",
            LogType::Info => "info",
            LogType::Success => "success",
            LogType::None => "none",
            LogType::Fatal => "fatal",
            LogType::Error => "error",
        }
    }

    /// Label used inside the brackets
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = ParseLogTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(LogType::Warning),
            "alert" => Ok(LogType::Alert),
            "info" => Ok(LogType::Info),
            "success" => Ok(LogType::Success),
            "none" => Ok(LogType::None),
            "fatal" => Ok(LogType::Fatal),
            "error" => Ok(LogType::Error),
            _ => Err(ParseLogTypeError(s.to_string())),
        }
    }
}

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    directory: PathBuf,
    file_enabled: bool,
    console_enabled: bool,
    timezone: Tz,
    clock: Arc<dyn Clock>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file_enabled: true,
            console_enabled: true,
            timezone: REFERENCE_TIMEZONE,
            clock: clock::system(),
        }
    }

    /// Build a logger from the `[logging]` and `[datetime]` sections
    pub fn from_config(logging: &LoggingConfig, datetime: &DatetimeConfig) -> anyhow::Result<Self> {
        Ok(Self {
            directory: logging.directory.clone(),
            file_enabled: logging.enabled,
            console_enabled: logging.console,
            timezone: datetime.timezone()?,
            clock: clock::system(),
        })
    }

    pub fn with_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console_enabled = enabled;
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.file_enabled = enabled;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn is_file_enabled(&self) -> bool {
        self.file_enabled
    }

    pub fn is_console_enabled(&self) -> bool {
        self.console_enabled
    }

    fn now(&self) -> FormattedDate {
        format_date_in(self.clock.now(), self.timezone)
    }

    /// Render a line without writing it
    pub fn format_line(&self, message: &str, log_type: LogType) -> String {
        match log_type {
            LogType::None => format!("{}\n", message),
            _ => format!("{} [{}] {}\n", self.now().time, log_type.label(), message),
        }
    }

    /// Render an error line without writing it
    pub fn format_error_line(&self, message: &str) -> String {
        self.format_line(message, LogType::Error)
    }

    /// Log a message to the console and the daily file
    pub fn log_data(&self, message: &str, log_type: LogType) {
        let line = self.format_line(message, log_type);
        self.emit(&line);
    }

    /// Log an error together with its chain of causes
    pub fn log_error(&self, error: &anyhow::Error) {
        let line = self.format_error_line(&format!("{:?}", error));
        self.emit(&line);
    }

    /// Log a plain error message verbatim
    pub fn log_error_message(&self, message: &str) {
        let line = self.format_error_line(message);
        self.emit(&line);
    }

    fn emit(&self, line: &str) {
        if self.console_enabled {
            print!("{}", line);
        }
        if self.file_enabled {
            if let Err(e) = self.write(line) {
                self.report_failure(&e);
            }
        }
    }

    fn report_failure(&self, error: &LoggerError) {
        eprintln!("{} [ERROR] {} {}", self.now().time, LOG_APPEND_FAILED, error);
        log::warn!("{} {}", LOG_APPEND_FAILED, error);
    }

    /// Directory the daily files live in, resolved against the working directory
    pub fn log_dir(&self) -> Result<PathBuf, LoggerError> {
        if self.directory.is_absolute() {
            Ok(self.directory.clone())
        } else {
            let cwd = std::env::current_dir().map_err(LoggerError::WorkingDir)?;
            Ok(cwd.join(&self.directory))
        }
    }

    /// Path of today's log file
    pub fn log_file_path(&self) -> Result<PathBuf, LoggerError> {
        let file_name = format!("{}.{}", self.now().date, LOG_FILE_EXTENSION);
        Ok(self.log_dir()?.join(file_name))
    }

    /// Append a line to today's file
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The file that was written to
    /// * `Err(LoggerError)` - The directory could not be created or the append failed
    pub fn write(&self, line: &str) -> Result<PathBuf, LoggerError> {
        let path = self.log_file_path()?;
        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::Append {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| LoggerError::Append {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    /// Append a line to today's file without blocking the runtime
    pub async fn write_async(&self, line: &str) -> Result<PathBuf, LoggerError> {
        let path = self.log_file_path()?;
        if let Some(dir) = path.parent() {
            if let Err(source) = tokio::fs::create_dir(dir).await {
                if source.kind() != io::ErrorKind::AlreadyExists {
                    return Err(LoggerError::CreateDir {
                        path: dir.to_path_buf(),
                        source,
                    });
                }
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| LoggerError::Append {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| LoggerError::Append {
                path: path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| LoggerError::Append {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Append a line on the tokio runtime and return immediately
    ///
    /// The handle may be dropped; awaiting it yields the write result.
    /// Must be called from within a runtime.
    pub fn spawn_write(&self, line: String) -> JoinHandle<Result<PathBuf, LoggerError>> {
        let logger = self.clone();
        tokio::spawn(async move { logger.write_async(&line).await })
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Create `dir` if missing, without creating its parents
fn ensure_dir(dir: &Path) -> Result<(), LoggerError> {
    if dir.exists() {
        return Ok(());
    }
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(LoggerError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Process-wide logger writing to `./logs`
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

/// Log a message through the process-wide logger
pub fn log_data(message: &str, log_type: LogType) {
    DEFAULT_LOGGER.log_data(message, log_type);
}

/// Log an error through the process-wide logger
pub fn log_error(error: &anyhow::Error) {
    DEFAULT_LOGGER.log_error(error);
}

/// Log a plain error message through the process-wide logger
pub fn log_error_message(message: &str) {
    DEFAULT_LOGGER.log_error_message(message);
}

/// Route `log` records into today's file and stdout
///
/// Records use the same `<HH:MM> [<LEVEL>] <message>` shape as [`Logger`].
/// The file is opened once, so a process running past midnight keeps writing
/// to the file of the day it started.
pub fn init(logging: &LoggingConfig, datetime: &DatetimeConfig) -> anyhow::Result<()> {
    let level = logging.level_filter()?;
    let timezone = datetime.timezone()?;
    let logger = Logger::from_config(logging, datetime)?;

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = format_date_in(clock::SystemClock.now(), timezone);
            out.finish(format_args!("{} [{}] {}", now.time, record.level(), message))
        })
        .level(level);

    if logging.console {
        dispatch = dispatch.chain(io::stdout());
    }

    if logging.enabled {
        let path = logger.log_file_path()?;
        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }
        dispatch = dispatch.chain(fern::log_file(&path)?);
    }

    dispatch
        .apply()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    Ok(())
}
