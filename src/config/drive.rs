//! Drive loop configuration from TOML.

use serde::Deserialize;

use super::units::StepInterval;

/// Half-steps in one turn of the rotating table.
pub const DEFAULT_STEPS: u32 = 4096;

/// Parameters of a plain forward drive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// Step index the drive starts from.
    #[serde(default)]
    pub start_index: i64,

    /// Number of step writes.
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Pause after every write.
    #[serde(default, rename = "step_interval_us")]
    pub step_interval: StepInterval,
}

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            start_index: 0,
            steps: DEFAULT_STEPS,
            step_interval: StepInterval::default(),
        }
    }
}
