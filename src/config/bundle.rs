//! Line bundle configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::LineOffsets;

/// Default GPIO controller device.
pub const DEFAULT_CHIP_PATH: &str = "/dev/gpiochip0";

/// Default consumer tag shown by the kernel for the requested lines.
pub const DEFAULT_CONSUMER: &str = "Rotating Table";

/// Which controller to open, which lines to claim and under what name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BundleConfig {
    /// GPIO chip device path.
    #[serde(default = "default_chip_path")]
    pub chip_path: String<64>,

    /// Line offsets for phases A, B, C, D.
    #[serde(default)]
    pub line_offsets: LineOffsets,

    /// Owner label attached to the line request (max 32 chars).
    #[serde(default = "default_consumer")]
    pub consumer: String<32>,
}

fn default_chip_path() -> String<64> {
    String::try_from(DEFAULT_CHIP_PATH).unwrap_or_default()
}

fn default_consumer() -> String<32> {
    String::try_from(DEFAULT_CONSUMER).unwrap_or_default()
}

impl BundleConfig {
    /// Create a bundle configuration.
    ///
    /// Returns `None` if `chip_path` exceeds 64 bytes or `consumer` exceeds 32.
    pub fn new(chip_path: &str, line_offsets: LineOffsets, consumer: &str) -> Option<Self> {
        Some(Self {
            chip_path: String::try_from(chip_path).ok()?,
            line_offsets,
            consumer: String::try_from(consumer).ok()?,
        })
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            chip_path: default_chip_path(),
            line_offsets: LineOffsets::default(),
            consumer: default_consumer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rotating_table() {
        let config = BundleConfig::default();
        assert_eq!(config.chip_path.as_str(), "/dev/gpiochip0");
        assert_eq!(config.line_offsets.as_array(), &[27, 22, 23, 24]);
        assert_eq!(config.consumer.as_str(), "Rotating Table");
    }

    #[test]
    fn test_new_rejects_long_consumer() {
        let long = "a consumer tag that is far longer than thirty-two bytes";
        assert!(BundleConfig::new("/dev/gpiochip0", LineOffsets::default(), long).is_none());
    }
}
