//! Value types for configuration.
//!
//! Line offsets are validated at construction so a bundle can never be bound
//! to the same physical line twice.

use core::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Offsets of the four phase lines, in phase order A, B, C, D.
///
/// Position `i` of a [`PhasePattern`](crate::sequence::PhasePattern) drives
/// the line at offset `i` of this array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineOffsets([u32; 4]);

impl LineOffsets {
    /// Wiring of the rotating table on a Raspberry Pi header.
    pub const ROTATING_TABLE: Self = Self([27, 22, 23, 24]);

    /// Create a new LineOffsets value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateLineOffset` if an offset repeats.
    pub fn new(offsets: [u32; 4]) -> Result<Self, ConfigError> {
        for (i, offset) in offsets.iter().enumerate() {
            if offsets[i + 1..].contains(offset) {
                return Err(ConfigError::DuplicateLineOffset(*offset));
            }
        }
        Ok(Self(offsets))
    }

    /// Create from a slice, which must hold exactly four distinct offsets.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LineCount` for any other length.
    pub fn from_slice(offsets: &[u32]) -> Result<Self, ConfigError> {
        let array: [u32; 4] = offsets
            .try_into()
            .map_err(|_| ConfigError::LineCount(offsets.len()))?;
        Self::new(array)
    }

    /// Get the offsets in phase order.
    #[inline]
    pub const fn as_array(&self) -> &[u32; 4] {
        &self.0
    }

    /// Iterate over the offsets in phase order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for LineOffsets {
    fn default() -> Self {
        Self::ROTATING_TABLE
    }
}

impl TryFrom<[u32; 4]> for LineOffsets {
    type Error = ConfigError;

    fn try_from(value: [u32; 4]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for LineOffsets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let values = heapless::Vec::<u32, 8>::deserialize(deserializer)?;
        LineOffsets::from_slice(&values).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Pause between two consecutive step writes, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepInterval(pub u32);

impl StepInterval {
    /// 2 ms, the pace the rotating table is wired for.
    pub const ROTATING_TABLE: Self = Self(2_000);

    /// Get the raw value in microseconds.
    #[inline]
    pub const fn micros(self) -> u32 {
        self.0
    }

    /// Convert to a duration.
    #[inline]
    pub const fn as_duration(self) -> Duration {
        Duration::from_micros(self.0 as u64)
    }
}

impl Default for StepInterval {
    fn default() -> Self {
        Self::ROTATING_TABLE
    }
}
