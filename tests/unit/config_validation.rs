//! Unit tests for configuration validation.

use rotating_table::config::{parse_config, validate_config, TableConfig};
use rotating_table::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[lines]
chip_path = "/dev/gpiochip4"
line_offsets = [5, 6, 13, 19]

[capture]
stops_per_revolution = 36
"#;

    let config: TableConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for an empty chip path.
#[test]
fn test_empty_chip_path() {
    let toml_str = r#"
[lines]
chip_path = ""
"#;

    let result = parse_config(toml_str);
    assert!(matches!(result, Err(Error::Config(ConfigError::EmptyChipPath))));
}

/// Test validation fails for a zero step interval.
#[test]
fn test_zero_step_interval() {
    let toml_str = r#"
[drive]
step_interval_us = 0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepInterval(0)))
    ));
}

/// Test validation fails for more stops than steps in a revolution.
#[test]
fn test_too_many_stops() {
    let toml_str = r#"
[capture]
stops_per_revolution = 5000
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStops {
            stops: 5000,
            steps_per_revolution: 4096,
        }))
    ));
}

/// Test validation fails for zero stops or zero revolutions.
#[test]
fn test_zero_stops_and_revolutions() {
    assert!(parse_config("[capture]\nstops_per_revolution = 0\n").is_err());
    assert!(matches!(
        parse_config("[capture]\nstops_per_revolution = 4\nrevolutions = 0\n"),
        Err(Error::Config(ConfigError::InvalidRevolutions(0)))
    ));
}

/// Test that parse errors carry the TOML message.
#[test]
fn test_parse_error_is_reported() {
    let result = parse_config("[lines\nchip_path = ");
    match result {
        Err(Error::Config(ConfigError::ParseError(msg))) => assert!(!msg.is_empty()),
        other => panic!("expected parse error, got {:?}", other),
    }
}

/// Test that empty configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    let config = TableConfig::default();
    assert!(validate_config(&config).is_ok());
}
