//! Configuration management for daykit
//!
//! This module handles loading, parsing, and validation of the optional
//! configuration file. Every field has a default, so a missing file or a
//! partial one behaves like the built-in settings.

use crate::constants::{
    CONFIG_DIR_FILE_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DATE_FORMAT, DEFAULT_DATE_SEPARATOR,
    DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, DEFAULT_MAX_YEARS_AHEAD, DEFAULT_TIME_SEPARATOR, DEFAULT_TIMEZONE,
    MAX_YEARS_AHEAD_LIMIT,
};
use crate::utils::datetime::DatetimeOptions;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub datetime: DatetimeConfig,
    pub logging: LoggingConfig,
}

/// Date/time configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeConfig {
    /// IANA zone dates are rendered and parsed in
    pub timezone: String,
    /// Separator between day, month and year in parsed input
    pub date_separator: String,
    /// Separator between hour and minute in parsed input
    pub time_separator: String,
    /// Latest accepted year, relative to the current one
    pub max_years_ahead: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append log lines to the daily file
    pub enabled: bool,
    /// Mirror log lines to stdout
    pub console: bool,
    /// Directory holding the daily files, relative to the working directory
    pub directory: PathBuf,
    /// Minimum level for records sent through the `log` facade
    pub level: String,
}

impl Default for DatetimeConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            date_separator: DEFAULT_DATE_SEPARATOR.to_string(),
            time_separator: DEFAULT_TIME_SEPARATOR.to_string(),
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            console: true,
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl DatetimeConfig {
    /// Resolve the configured zone
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }

    /// Parser separators taken from this section
    pub fn options(&self) -> DatetimeOptions {
        DatetimeOptions {
            date_separator: self.date_separator.clone(),
            time_separator: self.time_separator.clone(),
        }
    }
}

impl LoggingConfig {
    /// Resolve the configured level
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", self.level, e))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            log::debug!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate date/time settings
        self.datetime.timezone()?;

        if self.datetime.date_separator.is_empty() {
            anyhow::bail!("date_separator cannot be empty");
        }
        if self.datetime.time_separator.is_empty() {
            anyhow::bail!("time_separator cannot be empty");
        }

        if !(0..=MAX_YEARS_AHEAD_LIMIT).contains(&self.datetime.max_years_ahead) {
            anyhow::bail!(
                "max_years_ahead must be between 0 and {}, got {}",
                MAX_YEARS_AHEAD_LIMIT,
                self.datetime.max_years_ahead
            );
        }

        // Validate logging settings
        self.logging.level_filter()?;

        if self.logging.directory.as_os_str().is_empty() {
            anyhow::bail!("logging directory cannot be empty");
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# daykit configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format(DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("Generated default configuration file: {}", path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_DIR_FILE_NAME))
    }
}
