//! The four motor-phase output lines as one owned resource.

use log::{debug, info, warn};

use crate::config::{BundleConfig, LineOffsets};
use crate::error::{reason, AcquireError, WriteError};
use crate::sequence::PhasePattern;

use super::guard::Held;
use super::provider::{LineDirection, LineProvider};

/// Exclusive ownership of four output lines on one chip.
///
/// A `LineBundle` only exists fully constructed: [`acquire`](Self::acquire)
/// either returns a bundle ready for [`write`](Self::write) or an error with
/// every partially acquired resource already released.
///
/// The bundle does not track motor position; it only pushes patterns.
pub struct LineBundle<'p, P: LineProvider> {
    /// Granted line request; owns the chip.
    request: Held<'p, P, P::Request>,

    /// Offsets in phase order, fixed at acquisition.
    offsets: LineOffsets,

    /// Consumer tag the lines were requested under.
    consumer: heapless::String<32>,

    /// Set by `release` so drop can tell deliberate release from a leak.
    released: bool,
}

impl<'p, P: LineProvider> LineBundle<'p, P> {
    /// Open the chip, configure the four lines as outputs and request them.
    ///
    /// Stages run in order: chip open, direction settings, line configuration
    /// (offsets bound in phase order, stopping at the first failure), request
    /// descriptor, line request. The transient settings, line configuration
    /// and request descriptor are freed on every path, in that reverse order.
    /// The chip is closed only when no request was granted; on success it
    /// belongs to the request.
    ///
    /// # Errors
    ///
    /// Returns the [`AcquireError`] variant of the stage that failed.
    pub fn acquire(provider: &'p P, config: &BundleConfig) -> Result<Self, AcquireError> {
        debug!("opening chip {}", config.chip_path.as_str());
        let chip = provider.open_chip(config.chip_path.as_str()).map_err(|e| {
            warn!("open chip {} failed: {}", config.chip_path.as_str(), e);
            AcquireError::ChipOpen(reason(&e))
        })?;

        match Self::request(provider, chip, config) {
            Ok(request) => {
                info!(
                    "requested lines {:?} on {} as '{}'",
                    config.line_offsets.as_array(),
                    config.chip_path.as_str(),
                    config.consumer.as_str()
                );
                Ok(Self {
                    request: Held::new(provider, request, P::release),
                    offsets: config.line_offsets,
                    consumer: config.consumer.clone(),
                    released: false,
                })
            }
            Err((chip, error)) => {
                warn!("{} failed: {}", error.stage(), error);
                provider.close_chip(chip);
                Err(error)
            }
        }
    }

    /// Everything after the chip is open. The transient guards drop when
    /// this returns, before the caller decides the chip's fate.
    fn request(
        provider: &P,
        chip: P::Chip,
        config: &BundleConfig,
    ) -> Result<P::Request, (P::Chip, AcquireError)> {
        let settings = match provider.new_line_settings(LineDirection::Output) {
            Ok(settings) => Held::new(provider, settings, P::free_line_settings),
            Err(e) => return Err((chip, AcquireError::ConfigAlloc(reason(&e)))),
        };

        let mut lines = match provider.new_line_config() {
            Ok(lines) => Held::new(provider, lines, P::free_line_config),
            Err(e) => return Err((chip, AcquireError::ConfigAlloc(reason(&e)))),
        };

        for offset in config.line_offsets.iter() {
            debug!("binding line {} as output", offset);
            if let Err(e) = provider.add_line_settings(&mut *lines, offset, &*settings) {
                return Err((
                    chip,
                    AcquireError::LineBind {
                        offset,
                        reason: reason(&e),
                    },
                ));
            }
        }

        let request_config = match provider.new_request_config(config.consumer.as_str()) {
            Ok(request_config) => Held::new(provider, request_config, P::free_request_config),
            Err(e) => return Err((chip, AcquireError::RequestConfig(reason(&e)))),
        };

        provider
            .request_lines(chip, &*request_config, &*lines)
            .map_err(|(chip, e)| (chip, AcquireError::LineRequest(reason(&e))))
    }

    /// Push one pattern to the four lines in a single provider call.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if the provider rejects the values. The bundle
    /// stays valid.
    pub fn write(&self, pattern: PhasePattern) -> Result<(), WriteError> {
        self.request
            .provider()
            .set_values(&*self.request, pattern.lines())
            .map_err(|e| WriteError::new(reason(&e)))
    }

    /// Return the lines to the system.
    ///
    /// Consumes the bundle, so it cannot be released twice.
    pub fn release(mut self) {
        debug!("releasing lines {:?}", self.offsets.as_array());
        self.released = true;
    }

    /// Offsets in phase order.
    #[inline]
    pub fn offsets(&self) -> &LineOffsets {
        &self.offsets
    }

    /// Consumer tag the lines are held under.
    #[inline]
    pub fn consumer(&self) -> &str {
        self.consumer.as_str()
    }
}

impl<P: LineProvider> Drop for LineBundle<'_, P> {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "line bundle {:?} dropped without release",
                self.offsets.as_array()
            );
        }
    }
}
