//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{BundleConfig, CaptureConfig, DriveConfig, TableConfig};

/// Validate a table configuration.
///
/// Checks:
/// - Chip path and consumer tag are non-empty
/// - Line offsets are distinct
/// - Step intervals are non-zero
/// - Capture stops fit within one revolution
pub fn validate_config(config: &TableConfig) -> Result<()> {
    validate_lines(&config.lines)?;
    validate_drive(&config.drive)?;

    if let Some(ref capture) = config.capture {
        validate_capture(capture)?;
    }

    Ok(())
}

fn validate_lines(config: &BundleConfig) -> Result<()> {
    if config.chip_path.trim().is_empty() {
        return Err(Error::Config(ConfigError::EmptyChipPath));
    }

    if config.consumer.trim().is_empty() {
        return Err(Error::Config(ConfigError::EmptyConsumer));
    }

    // LineOffsets checks this on deserialization; re-check for hand-built values
    super::LineOffsets::new(*config.line_offsets.as_array())?;

    Ok(())
}

fn validate_drive(config: &DriveConfig) -> Result<()> {
    if config.step_interval.micros() == 0 {
        return Err(Error::Config(ConfigError::InvalidStepInterval(0)));
    }

    Ok(())
}

fn validate_capture(config: &CaptureConfig) -> Result<()> {
    if config.step_interval.micros() == 0 {
        return Err(Error::Config(ConfigError::InvalidStepInterval(0)));
    }

    if config.stops_per_revolution == 0 || config.stops_per_revolution > config.steps_per_revolution
    {
        return Err(Error::Config(ConfigError::InvalidStops {
            stops: config.stops_per_revolution,
            steps_per_revolution: config.steps_per_revolution,
        }));
    }

    if config.revolutions == 0 {
        return Err(Error::Config(ConfigError::InvalidRevolutions(0)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepInterval;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TableConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = TableConfig::default();
        config.drive.step_interval = StepInterval(0);

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStepInterval(0)))
        ));
    }

    #[test]
    fn test_blank_consumer_rejected() {
        let mut config = TableConfig::default();
        config.lines.consumer = heapless::String::try_from("  ").unwrap();

        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::Config(ConfigError::EmptyConsumer))));
    }
}
