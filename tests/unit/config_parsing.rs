//! Unit tests for TOML configuration parsing.

use rotating_table::config::{parse_config, TableConfig};

/// Test parsing a complete configuration.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[lines]
chip_path = "/dev/gpiochip0"
line_offsets = [27, 22, 23, 24]
consumer = "Rotating Table"

[drive]
start_index = 3
steps = 2048
step_interval_us = 1500
"#;

    let config: TableConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.lines.chip_path.as_str(), "/dev/gpiochip0");
    assert_eq!(config.lines.line_offsets.as_array(), &[27, 22, 23, 24]);
    assert_eq!(config.lines.consumer.as_str(), "Rotating Table");
    assert_eq!(config.drive.start_index, 3);
    assert_eq!(config.drive.steps, 2048);
    assert_eq!(config.drive.step_interval.micros(), 1500);
}

/// Test that omitted fields fall back to the stock table.
#[test]
fn test_partial_sections_use_defaults() {
    let toml_str = r#"
[lines]
consumer = "bench rig"

[drive]
steps = 16
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.lines.chip_path.as_str(), "/dev/gpiochip0");
    assert_eq!(config.lines.line_offsets.as_array(), &[27, 22, 23, 24]);
    assert_eq!(config.lines.consumer.as_str(), "bench rig");
    assert_eq!(config.drive.start_index, 0);
    assert_eq!(config.drive.steps, 16);
    assert_eq!(config.drive.step_interval.micros(), 2000);
}

/// Test parsing a capture rotation.
#[test]
fn test_parse_capture() {
    let toml_str = r#"
[capture]
stops_per_revolution = 24
revolutions = 2
dwell_ms = 750
step_interval_us = 3000
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let capture = config.capture.expect("Capture not found");

    assert_eq!(capture.stops_per_revolution, 24);
    assert_eq!(capture.revolutions, 2);
    assert_eq!(capture.steps_per_revolution, 4096);
    assert_eq!(capture.dwell_ms, 750);
    assert_eq!(capture.step_interval.micros(), 3000);
}

/// Test that duplicate line offsets are rejected during parsing.
#[test]
fn test_duplicate_offsets_rejected() {
    let toml_str = r#"
[lines]
line_offsets = [27, 22, 22, 24]
"#;

    let result: Result<TableConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Should reject repeated line offsets");
}

/// Test that anything but four offsets is rejected during parsing.
#[test]
fn test_wrong_offset_count_rejected() {
    for offsets in ["[27, 22, 23]", "[27, 22, 23, 24, 25]", "[]"] {
        let toml_str = format!("[lines]\nline_offsets = {offsets}\n");
        let result: Result<TableConfig, _> = toml::from_str(&toml_str);
        assert!(result.is_err(), "Should reject {}", offsets);
    }
}

/// Test that an over-long consumer tag is rejected during parsing.
#[test]
fn test_long_consumer_rejected() {
    let toml_str = r#"
[lines]
consumer = "a consumer tag that does not fit in thirty-two bytes"
"#;

    let result: Result<TableConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}
