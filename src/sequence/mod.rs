//! Sequence module for rotating-table.
//!
//! Maps step indices to half-step phase patterns and drives them onto a
//! [`LineBundle`](crate::lines::LineBundle).

mod delay;
mod drive;
mod plan;
mod table;

pub use delay::pause;
#[cfg(feature = "std")]
pub use delay::StdDelay;
pub use drive::{drive, drive_towards, drive_until, DriveOutcome};
pub use plan::{run_plan, PlanOutcome, RotationPlan, StopEvent};
pub use table::{
    pattern_for, slot, Direction, Phase, PhasePattern, StepIndex, STEPS_PER_CYCLE, STEP_TABLE,
};
