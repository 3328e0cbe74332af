//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::TableConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use rotating_table::load_config;
///
/// let config = load_config("table.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TableConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<TableConfig> {
    let config: TableConfig = toml::from_str(content).map_err(|e| {
        Error::Config(ConfigError::ParseError(crate::error::reason(&e.message())))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}
