//! Table configuration - root configuration structure.

use serde::Deserialize;

use super::bundle::BundleConfig;
use super::capture::CaptureConfig;
use super::drive::DriveConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; an empty file describes the stock rotating
/// table: `/dev/gpiochip0`, lines 27, 22, 23, 24, one turn at 2 ms per step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TableConfig {
    /// Chip, lines and consumer tag.
    #[serde(default)]
    pub lines: BundleConfig,

    /// Plain forward drive.
    #[serde(default)]
    pub drive: DriveConfig,

    /// Stop-and-dwell rotation; replaces the plain drive when present.
    #[serde(default)]
    pub capture: Option<CaptureConfig>,
}
