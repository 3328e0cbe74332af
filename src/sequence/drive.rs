//! Blocking step driver.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::error::WriteError;
use crate::lines::{LineBundle, LineProvider};

use super::delay::pause;
use super::table::{Direction, StepIndex};

/// Write `step_count` consecutive patterns starting at `start_index`,
/// ascending, pausing `interval` after each write.
///
/// # Errors
///
/// Stops at the first rejected write and returns it; the motor is left at
/// the last index that was written successfully and the bundle stays usable.
pub fn drive<P, D>(
    bundle: &LineBundle<'_, P>,
    start_index: i64,
    step_count: u32,
    delay: &mut D,
    interval: Duration,
) -> Result<(), WriteError>
where
    P: LineProvider,
    D: DelayNs,
{
    drive_towards(
        bundle,
        StepIndex::new(start_index),
        step_count,
        Direction::Forward,
        delay,
        interval,
    )
    .map(|_| ())
}

/// Like [`drive`], in either direction.
///
/// Returns the index following the last write, ready to continue from.
///
/// # Errors
///
/// The returned [`WriteError`] carries the index whose write failed.
pub fn drive_towards<P, D>(
    bundle: &LineBundle<'_, P>,
    start: StepIndex,
    step_count: u32,
    direction: Direction,
    delay: &mut D,
    interval: Duration,
) -> Result<StepIndex, WriteError>
where
    P: LineProvider,
    D: DelayNs,
{
    debug!(
        "driving {} steps {:?} from index {}",
        step_count,
        direction,
        start.value()
    );

    let mut index = start;
    for _ in 0..step_count {
        let pattern = index.pattern();
        trace!("step {} -> {}", index.value(), pattern);

        bundle.write(pattern).map_err(|e| {
            warn!("write at step {} failed: {}", index.value(), e);
            e.at_step(index.value())
        })?;

        pause(delay, interval);
        index = index.advance(direction);
    }

    Ok(index)
}

/// How an interruptible drive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveOutcome {
    /// Patterns written.
    pub steps_done: u32,
    /// Index following the last write.
    pub index: StepIndex,
    /// Whether the stop flag ended the drive early.
    pub cancelled: bool,
}

/// Like [`drive_towards`], but checks `stop` before every write and ends
/// early once it is set.
///
/// # Errors
///
/// The returned [`WriteError`] carries the index whose write failed.
pub fn drive_until<P, D>(
    bundle: &LineBundle<'_, P>,
    start: StepIndex,
    step_count: u32,
    direction: Direction,
    delay: &mut D,
    interval: Duration,
    stop: &AtomicBool,
) -> Result<DriveOutcome, WriteError>
where
    P: LineProvider,
    D: DelayNs,
{
    let mut index = start;
    for done in 0..step_count {
        if stop.load(Ordering::Relaxed) {
            warn!("drive stopped after {} of {} steps", done, step_count);
            return Ok(DriveOutcome {
                steps_done: done,
                index,
                cancelled: true,
            });
        }
        bundle
            .write(index.pattern())
            .map_err(|e| e.at_step(index.value()))?;
        pause(delay, interval);
        index = index.advance(direction);
    }

    Ok(DriveOutcome {
        steps_done: step_count,
        index,
        cancelled: false,
    })
}
