//! Configuration module for rotating-table.
//!
//! Provides types for loading and validating the line bundle, drive and
//! capture settings from TOML files (with `std` feature) or pre-built values.

mod bundle;
mod capture;
mod drive;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use bundle::{BundleConfig, DEFAULT_CHIP_PATH, DEFAULT_CONSUMER};
pub use capture::CaptureConfig;
pub use drive::{DriveConfig, DEFAULT_STEPS};
pub use system::TableConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{LineOffsets, StepInterval};
