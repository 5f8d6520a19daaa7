use daykit::config::Config;
use daykit::constants::DEFAULT_TIMEZONE;
use daykit::utils::datetime::DatetimeParser;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.datetime.timezone, DEFAULT_TIMEZONE);
    assert_eq!(config.datetime.date_separator, "/");
    assert_eq!(config.datetime.time_separator, ":");
    assert_eq!(config.datetime.max_years_ahead, 2);
    assert!(config.logging.enabled);
    assert!(config.logging.console);
    assert_eq!(config.logging.directory, PathBuf::from("logs"));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown timezone should fail
    config.datetime.timezone = "Mars/Olympus".to_string();
    assert!(config.validate().is_err());

    // Reset and test empty separator
    config.datetime.timezone = DEFAULT_TIMEZONE.to_string();
    config.datetime.date_separator = String::new();
    assert!(config.validate().is_err());

    // Reset and test year window
    config.datetime.date_separator = "/".to_string();
    config.datetime.max_years_ahead = -1;
    assert!(config.validate().is_err());

    // Reset and test log level
    config.datetime.max_years_ahead = 2;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("timezone = \"Europe/Amsterdam\""));
    assert!(toml_str.contains("directory = \"logs\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[datetime]
date_separator = "-"

[logging]
console = false
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.datetime.date_separator, "-");
    assert!(!config.logging.console);

    // Check that unspecified values use defaults
    assert_eq!(config.datetime.time_separator, ":");
    assert_eq!(config.datetime.timezone, DEFAULT_TIMEZONE);
    assert!(config.logging.enabled);
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.datetime.timezone, default_config.datetime.timezone);
    assert_eq!(config.logging.directory, default_config.logging.directory);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daykit.toml");
    std::fs::write(&path, "[datetime]\ntimezone = \"Nowhere/Special\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid timezone"));
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    // Generate config should create the directory structure
    Config::generate_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# daykit configuration file"));

    // The generated file loads back
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.datetime.timezone, DEFAULT_TIMEZONE);
}

#[test]
fn test_parser_from_config() {
    let mut config = Config::default();
    config.datetime.date_separator = "-".to_string();
    config.datetime.timezone = "UTC".to_string();

    let parser = DatetimeParser::from_config(&config.datetime).unwrap();
    assert_eq!(parser.options().date_separator(), "-");

    config.datetime.timezone = "Invalid/Zone".to_string();
    assert!(DatetimeParser::from_config(&config.datetime).is_err());
}
