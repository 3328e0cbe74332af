//! Capture rotation configuration from TOML.

use core::time::Duration;

use serde::Deserialize;

use super::drive::DEFAULT_STEPS;
use super::units::StepInterval;
use crate::sequence::RotationPlan;

/// A stop-and-dwell rotation, e.g. for photographing an object on the table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureConfig {
    /// Equally spaced stops in one revolution.
    pub stops_per_revolution: u32,

    /// Full turns to make.
    #[serde(default = "default_revolutions")]
    pub revolutions: u32,

    /// Half-steps in one revolution of the table.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u32,

    /// Pause at each stop in milliseconds.
    #[serde(default)]
    pub dwell_ms: u32,

    /// Pause after every step write.
    #[serde(default, rename = "step_interval_us")]
    pub step_interval: StepInterval,
}

fn default_revolutions() -> u32 {
    1
}

fn default_steps_per_revolution() -> u32 {
    DEFAULT_STEPS
}

impl CaptureConfig {
    /// Build the runtime rotation plan.
    pub fn plan(&self) -> RotationPlan {
        RotationPlan {
            steps_per_revolution: self.steps_per_revolution,
            stops_per_revolution: self.stops_per_revolution,
            revolutions: self.revolutions,
            step_interval: self.step_interval.as_duration(),
            dwell: Duration::from_millis(self.dwell_ms as u64),
        }
    }
}
