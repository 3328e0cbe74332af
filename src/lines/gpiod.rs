//! Linux GPIO character device backend over the `gpiod` crate.
//!
//! The kernel takes the whole request in one ioctl, so settings, line
//! configuration and request descriptor are plain values gathered up front.
//! Only opening the chip and the final request touch the device.

use std::io;
use std::string::String;
use std::vec::Vec;

use ::gpiod::{Chip, Lines, Options, Output};

use super::provider::{LineDirection, LineProvider};

/// [`LineProvider`] for `/dev/gpiochipN` devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpiodProvider;

/// Settings shared by every line of a request.
#[derive(Debug, Clone, Copy)]
pub struct GpiodSettings {
    direction: LineDirection,
}

/// Offsets gathered for a request, in phase order.
#[derive(Debug, Default)]
pub struct GpiodLineConfig {
    offsets: Vec<u32>,
}

impl GpiodLineConfig {
    /// The gathered offsets, which must be exactly four.
    fn four_offsets(&self) -> io::Result<[u32; 4]> {
        self.offsets
            .as_slice()
            .try_into()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "expected four lines"))
    }
}

/// Consumer tag for a request.
#[derive(Debug)]
pub struct GpiodRequestConfig {
    consumer: String,
}

/// Granted output lines. Keeps the chip open for as long as the lines live.
pub struct GpiodRequest {
    lines: Lines<Output>,
    _chip: Chip,
}

impl GpiodProvider {
    /// Create the provider.
    pub fn new() -> Self {
        Self
    }
}

impl LineProvider for GpiodProvider {
    type Error = io::Error;
    type Chip = Chip;
    type Settings = GpiodSettings;
    type LineConfig = GpiodLineConfig;
    type RequestConfig = GpiodRequestConfig;
    type Request = GpiodRequest;

    fn open_chip(&self, path: &str) -> io::Result<Chip> {
        Chip::new(path)
    }

    fn close_chip(&self, chip: Chip) {
        drop(chip);
    }

    fn new_line_settings(&self, direction: LineDirection) -> io::Result<GpiodSettings> {
        Ok(GpiodSettings { direction })
    }

    fn free_line_settings(&self, _settings: GpiodSettings) {}

    fn new_line_config(&self) -> io::Result<GpiodLineConfig> {
        Ok(GpiodLineConfig::default())
    }

    fn add_line_settings(
        &self,
        config: &mut GpiodLineConfig,
        offset: u32,
        settings: &GpiodSettings,
    ) -> io::Result<()> {
        if settings.direction != LineDirection::Output {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "only output lines are supported",
            ));
        }
        if config.offsets.contains(&offset) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "line configured twice",
            ));
        }
        config.offsets.push(offset);
        Ok(())
    }

    fn free_line_config(&self, _config: GpiodLineConfig) {}

    fn new_request_config(&self, consumer: &str) -> io::Result<GpiodRequestConfig> {
        Ok(GpiodRequestConfig {
            consumer: consumer.into(),
        })
    }

    fn free_request_config(&self, _config: GpiodRequestConfig) {}

    fn request_lines(
        &self,
        chip: Chip,
        request: &GpiodRequestConfig,
        lines: &GpiodLineConfig,
    ) -> Result<GpiodRequest, (Chip, io::Error)> {
        let offsets = match lines.four_offsets() {
            Ok(offsets) => offsets,
            Err(e) => return Err((chip, e)),
        };

        let options = Options::output(offsets)
            .values([false; 4])
            .consumer(request.consumer.as_str());

        match chip.request_lines(options) {
            Ok(lines) => Ok(GpiodRequest { lines, _chip: chip }),
            Err(e) => Err((chip, e)),
        }
    }

    fn set_values(&self, request: &GpiodRequest, values: &[bool; 4]) -> io::Result<()> {
        request.lines.set_values(*values)
    }

    fn release(&self, request: GpiodRequest) {
        drop(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(offsets: &[u32]) -> GpiodLineConfig {
        let provider = GpiodProvider::new();
        let settings = provider.new_line_settings(LineDirection::Output).unwrap();
        let mut config = provider.new_line_config().unwrap();
        for &offset in offsets {
            provider
                .add_line_settings(&mut config, offset, &settings)
                .unwrap();
        }
        config
    }

    #[test]
    fn test_lines_gathered_in_order() {
        let config = config_with(&[27, 22, 23, 24]);
        assert_eq!(config.four_offsets().unwrap(), [27, 22, 23, 24]);
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let provider = GpiodProvider::new();
        let settings = provider.new_line_settings(LineDirection::Output).unwrap();
        let mut config = config_with(&[27, 22]);

        let err = provider
            .add_line_settings(&mut config, 22, &settings)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(config.offsets, vec![27, 22]);
    }

    #[test]
    fn test_input_settings_rejected() {
        let provider = GpiodProvider::new();
        let settings = provider.new_line_settings(LineDirection::Input).unwrap();
        let mut config = provider.new_line_config().unwrap();

        let err = provider
            .add_line_settings(&mut config, 27, &settings)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(config.offsets.is_empty());
    }

    #[test]
    fn test_request_needs_exactly_four_lines() {
        for offsets in [&[][..], &[27, 22, 23][..], &[27, 22, 23, 24, 25][..]] {
            let err = config_with(offsets).four_offsets().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{:?}", offsets);
        }
    }
}
