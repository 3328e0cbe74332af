//! Stop-and-dwell rotation for capture sessions.
//!
//! The table turns through equally spaced stops. At each stop the caller is
//! notified (e.g. to trigger a camera), then the table dwells before moving
//! on. A shared flag ends the run early between stops.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::error::WriteError;
use crate::lines::{LineBundle, LineProvider};

use super::delay::pause;
use super::drive::drive_towards;
use super::table::{Direction, StepIndex};

/// Where to stop and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPlan {
    /// Half-steps in one revolution of the table.
    pub steps_per_revolution: u32,
    /// Equally spaced stops per revolution.
    pub stops_per_revolution: u32,
    /// Full turns.
    pub revolutions: u32,
    /// Pause after every step write.
    pub step_interval: Duration,
    /// Pause at every stop.
    pub dwell: Duration,
}

impl RotationPlan {
    /// Number of stops over the whole run.
    #[inline]
    pub fn total_stops(&self) -> u64 {
        self.stops_per_revolution as u64 * self.revolutions as u64
    }

    /// Steps from the start of the run to stop `k`.
    ///
    /// Stops are placed at `k * steps_per_revolution / stops_per_revolution`
    /// within each revolution, so rounding never accumulates.
    pub fn stop_target(&self, k: u64) -> u64 {
        let stops = self.stops_per_revolution.max(1) as u64;
        let steps = self.steps_per_revolution as u64;
        (k / stops) * steps + (k % stops) * steps / stops
    }
}

/// The table reached a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StopEvent {
    /// Stop number over the whole run, from 0.
    pub stop: u64,
    /// Revolution the stop belongs to, from 0.
    pub revolution: u64,
    /// Stops in the whole run.
    pub total: u64,
    /// Step index the table is at.
    pub index: StepIndex,
}

impl StopEvent {
    /// Share of the run completed before this stop, in whole percent.
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.stop.min(self.total) * 100 / self.total) as u8
    }
}

/// How a plan run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanOutcome {
    /// Stops visited, including the move away from each.
    pub stops_completed: u64,
    /// Index following the last write.
    pub index: StepIndex,
    /// Whether the stop flag ended the run.
    pub cancelled: bool,
}

/// Run `plan` forward from `start`.
///
/// For each stop: check `stop`, call `on_stop` at the current index, dwell,
/// then drive to the next stop. The first stop is `start` itself, before any
/// write. The move after the last stop brings the table back to its starting
/// angle and is not reported.
///
/// # Errors
///
/// A rejected write aborts the run as in [`drive`](super::drive).
pub fn run_plan<P, D, F>(
    bundle: &LineBundle<'_, P>,
    plan: &RotationPlan,
    start: StepIndex,
    delay: &mut D,
    stop: &AtomicBool,
    mut on_stop: F,
) -> Result<PlanOutcome, WriteError>
where
    P: LineProvider,
    D: DelayNs,
    F: FnMut(&StopEvent),
{
    let total = plan.total_stops();
    info!(
        "rotating {} revolution(s) with {} stops each",
        plan.revolutions, plan.stops_per_revolution
    );

    let mut index = start;
    for k in 0..total {
        if stop.load(Ordering::Relaxed) {
            info!("rotation stopped after {} of {} stops", k, total);
            return Ok(PlanOutcome {
                stops_completed: k,
                index,
                cancelled: true,
            });
        }

        on_stop(&StopEvent {
            stop: k,
            revolution: k / plan.stops_per_revolution.max(1) as u64,
            total,
            index,
        });
        pause(delay, plan.dwell);

        let steps = plan.stop_target(k + 1) - plan.stop_target(k);
        index = drive_towards(
            bundle,
            index,
            steps as u32,
            Direction::Forward,
            delay,
            plan.step_interval,
        )?;
    }

    info!("rotation complete, {} stops", total);
    Ok(PlanOutcome {
        stops_completed: total,
        index,
        cancelled: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(steps: u32, stops: u32, revolutions: u32) -> RotationPlan {
        RotationPlan {
            steps_per_revolution: steps,
            stops_per_revolution: stops,
            revolutions,
            step_interval: Duration::ZERO,
            dwell: Duration::ZERO,
        }
    }

    #[test]
    fn test_progress() {
        let event = StopEvent {
            stop: 3,
            revolution: 0,
            total: 12,
            index: StepIndex::new(0),
        };
        assert_eq!(event.progress_percent(), 25);

        let last = StopEvent { stop: 11, ..event };
        assert_eq!(last.progress_percent(), 91);
    }

    #[test]
    fn test_stop_targets_even() {
        let p = plan(4096, 4, 1);
        assert_eq!(p.stop_target(0), 0);
        assert_eq!(p.stop_target(1), 1024);
        assert_eq!(p.stop_target(4), 4096);
    }

    #[test]
    fn test_stop_targets_do_not_drift() {
        let p = plan(4096, 3, 2);
        assert_eq!(p.total_stops(), 6);
        assert_eq!(p.stop_target(1), 1365);
        assert_eq!(p.stop_target(2), 2730);
        assert_eq!(p.stop_target(3), 4096);
        assert_eq!(p.stop_target(6), 8192);
    }
}
