//! The digital I/O provider seam.
//!
//! Mirrors the staged request model of the Linux GPIO character device:
//! a chip handle, per-line settings, a line configuration binding settings to
//! offsets, a request descriptor carrying the consumer tag, and finally the
//! line request itself.

use core::fmt::Display;

/// Direction requested for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineDirection {
    /// Line is read by the process.
    Input,
    /// Line is driven by the process; starts inactive.
    Output,
}

/// A GPIO subsystem able to hand out exclusive line requests.
///
/// Every `new_*`/`open_*` operation has a matching `free_*`/`close_*`
/// operation. [`LineBundle::acquire`](super::LineBundle::acquire) pairs them
/// so nothing leaks on any exit path.
pub trait LineProvider {
    /// Error reported by the subsystem.
    type Error: Display;
    /// Open controller handle.
    type Chip;
    /// Per-line settings (direction).
    type Settings;
    /// Settings bound to line offsets.
    type LineConfig;
    /// Request descriptor (consumer tag).
    type RequestConfig;
    /// Granted, exclusively owned set of lines.
    type Request;

    /// Open the controller at `path`.
    fn open_chip(&self, path: &str) -> Result<Self::Chip, Self::Error>;

    /// Close a chip that never became part of a request.
    fn close_chip(&self, chip: Self::Chip);

    /// Allocate line settings for `direction`.
    fn new_line_settings(&self, direction: LineDirection) -> Result<Self::Settings, Self::Error>;

    /// Free line settings.
    fn free_line_settings(&self, settings: Self::Settings);

    /// Allocate an empty line configuration.
    fn new_line_config(&self) -> Result<Self::LineConfig, Self::Error>;

    /// Bind `settings` to the line at `offset`.
    ///
    /// Lines are laid out in the order they are added.
    fn add_line_settings(
        &self,
        config: &mut Self::LineConfig,
        offset: u32,
        settings: &Self::Settings,
    ) -> Result<(), Self::Error>;

    /// Free a line configuration.
    fn free_line_config(&self, config: Self::LineConfig);

    /// Allocate a request descriptor tagged with `consumer`.
    fn new_request_config(&self, consumer: &str) -> Result<Self::RequestConfig, Self::Error>;

    /// Free a request descriptor.
    fn free_request_config(&self, config: Self::RequestConfig);

    /// Request the configured lines.
    ///
    /// The chip moves into the returned request. On failure it is handed
    /// back so the caller can close it.
    fn request_lines(
        &self,
        chip: Self::Chip,
        request: &Self::RequestConfig,
        lines: &Self::LineConfig,
    ) -> Result<Self::Request, (Self::Chip, Self::Error)>;

    /// Set all four lines in one call, in the order they were configured.
    fn set_values(&self, request: &Self::Request, values: &[bool; 4]) -> Result<(), Self::Error>;

    /// Return the lines to the system. Also releases the chip held by the request.
    fn release(&self, request: Self::Request);
}
