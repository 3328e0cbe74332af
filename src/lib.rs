//! # rotating-table
//!
//! Half-step drive for a 4-wire stepper motor on four GPIO output lines.
//!
//! ## Features
//!
//! - **Leak-free acquisition**: the four phase lines are claimed as one
//!   [`LineBundle`]; a failure at any stage releases everything acquired so far
//! - **Exact half-step table**: 8 phase patterns indexed by true modulo, so
//!   negative step indices turn the motor backwards
//! - **Pluggable GPIO**: any [`LineProvider`]; Linux `gpiod` and an in-memory
//!   simulator are included
//! - **embedded-hal 1.0**: step timing through `DelayNs`
//! - **no_std compatible**: acquisition, step table and driver need no `std`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rotating_table::{drive, BundleConfig, GpiodProvider, LineBundle, StdDelay};
//! use core::time::Duration;
//!
//! let provider = GpiodProvider::new();
//! let bundle = LineBundle::acquire(&provider, &BundleConfig::default())?;
//!
//! // One full turn of the table
//! drive(&bundle, 0, 4096, &mut StdDelay, Duration::from_millis(2))?;
//!
//! bundle.release();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML loading, the simulator and `StdDelay`
//! - `gpiod`: Enables the Linux GPIO character device backend
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod error;
pub mod lines;
pub mod sequence;

// Re-exports for ergonomic API
pub use config::{validate_config, BundleConfig, CaptureConfig, DriveConfig, TableConfig};
pub use error::{AcquireError, ConfigError, Error, Result, WriteError};
pub use lines::{LineBundle, LineDirection, LineProvider};
pub use sequence::{
    drive, drive_towards, drive_until, pattern_for, run_plan, Direction, PhasePattern,
    RotationPlan, StepIndex, STEP_TABLE,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

#[cfg(feature = "std")]
pub use lines::SimProvider;
#[cfg(feature = "std")]
pub use sequence::StdDelay;

#[cfg(feature = "gpiod")]
pub use lines::GpiodProvider;

// Unit types
pub use config::units::{LineOffsets, StepInterval};
