//! Line module for rotating-table.
//!
//! Provides the GPIO provider seam and the [`LineBundle`] that owns the four
//! motor-phase output lines.

mod bundle;
mod guard;
mod provider;
#[cfg(feature = "gpiod")]
pub mod gpiod;
#[cfg(feature = "std")]
pub mod sim;

pub use bundle::LineBundle;
pub use provider::{LineDirection, LineProvider};

#[cfg(feature = "gpiod")]
pub use self::gpiod::GpiodProvider;
#[cfg(feature = "std")]
pub use sim::SimProvider;
