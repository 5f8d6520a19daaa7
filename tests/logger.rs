use chrono::{DateTime, TimeZone, Utc};
use daykit::config::{DatetimeConfig, LoggingConfig};
use daykit::logger::{LogType, Logger};
use daykit::{FixedClock, LoggerError};
use std::fs;
use std::path::Path;

fn frozen_now() -> DateTime<Utc> {
    // 14:03 in Amsterdam
    Utc.with_ymd_and_hms(2025, 1, 10, 13, 3, 0).unwrap()
}

fn test_logger(dir: &Path) -> Logger {
    Logger::new()
        .with_directory(dir.join("logs"))
        .with_console(false)
        .with_clock(FixedClock::new(frozen_now()))
}

#[test]
fn test_format_line() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(dir.path());

    assert_eq!(logger.format_line("x", LogType::None), "x\n");
    assert_eq!(logger.format_line("x", LogType::Info), "14:03 [INFO] x\n");
    assert_eq!(
        logger.format_line("disk low", LogType::Warning),
        "14:03 [WARNING] disk low\n"
    );
}

#[test]
fn test_log_type_from_str() {
    assert_eq!("warning".parse::<LogType>(), Ok(LogType::Warning));
    assert_eq!("FATAL".parse::<LogType>(), Ok(LogType::Fatal));
    assert_eq!("none".parse::<LogType>(), Ok(LogType::None));
    assert!("verbose".parse::<LogType>().is_err());
}

#[test]
fn test_log_data_appends_to_daily_file() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(dir.path());

    logger.log_data("x", LogType::None);
    logger.log_data("x", LogType::Info);

    let path = dir.path().join("logs").join("10-01-2025.log");
    assert_eq!(logger.log_file_path().unwrap(), path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\n14:03 [INFO] x\n");
}

#[test]
fn test_log_file_named_after_reference_zone_date() {
    let dir = tempfile::tempdir().unwrap();
    // 22:30 UTC on 1 July is already 2 July in Amsterdam
    let logger = test_logger(dir.path()).with_clock(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 7, 1, 22, 30, 0).unwrap(),
    ));

    let path = logger.write("late\n").unwrap();
    assert_eq!(path, dir.path().join("logs").join("02-07-2024.log"));
}

#[test]
fn test_log_error_includes_causes() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(dir.path());

    let error = anyhow::anyhow!("disk full").context("saving report");
    logger.log_error(&error);
    logger.log_error_message("plain failure");

    let content = fs::read_to_string(logger.log_file_path().unwrap()).unwrap();
    assert!(content.starts_with("14:03 [ERROR] saving report"));
    assert!(content.contains("disk full"));
    assert!(content.ends_with("14:03 [ERROR] plain failure\n"));
}

#[test]
fn test_write_reports_missing_parent() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new()
        .with_directory(dir.path().join("missing").join("logs"))
        .with_console(false)
        .with_clock(FixedClock::new(frozen_now()));

    let result = logger.write("lost\n");
    assert!(matches!(result, Err(LoggerError::CreateDir { .. })));

    // Best-effort logging swallows the failure
    logger.log_data("lost", LogType::Alert);
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn test_file_output_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(dir.path()).with_file(false);

    assert!(!logger.is_file_enabled());
    logger.log_data("console only", LogType::Success);
    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_relative_directory_resolves_against_cwd() {
    let logger = Logger::new();
    let expected = std::env::current_dir().unwrap().join("logs");
    assert_eq!(logger.log_dir().unwrap(), expected);
}

#[test]
fn test_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let logging = LoggingConfig {
        enabled: false,
        console: false,
        directory: dir.path().join("custom"),
        ..LoggingConfig::default()
    };

    let logger = Logger::from_config(&logging, &DatetimeConfig::default()).unwrap();
    assert!(!logger.is_file_enabled());
    assert!(!logger.is_console_enabled());
    assert_eq!(logger.log_dir().unwrap(), dir.path().join("custom"));

    let bad_zone = DatetimeConfig {
        timezone: "Atlantis/Capital".to_string(),
        ..DatetimeConfig::default()
    };
    assert!(Logger::from_config(&logging, &bad_zone).is_err());
}

#[tokio::test]
async fn test_spawn_write_reports_result() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(dir.path());

    let line = logger.format_line("async", LogType::Info);
    let path = logger.spawn_write(line).await.unwrap().unwrap();
    logger.write_async("14:03 [INFO] second\n").await.unwrap();

    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "14:03 [INFO] async\n14:03 [INFO] second\n"
    );
}

#[tokio::test]
async fn test_write_async_reports_missing_parent() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new()
        .with_directory(dir.path().join("missing").join("logs"))
        .with_clock(FixedClock::new(frozen_now()));

    let result = logger.write_async("lost\n").await;
    assert!(matches!(result, Err(LoggerError::CreateDir { .. })));
}
