//! Delay helpers over `embedded_hal::delay::DelayNs`.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// Block for `interval`, split into `u32` nanosecond chunks.
pub fn pause<D: DelayNs>(delay: &mut D, interval: Duration) {
    let mut remaining = interval.as_nanos();
    while remaining > 0 {
        let chunk = remaining.min(u32::MAX as u128) as u32;
        delay.delay_ns(chunk);
        remaining -= chunk as u128;
    }
}

/// Delay provider that sleeps the calling thread.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<u32>);

    impl DelayNs for Recorder {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(ns);
        }
    }

    #[test]
    fn test_pause_short() {
        let mut delay = Recorder::default();
        pause(&mut delay, Duration::from_millis(2));
        assert_eq!(delay.0, vec![2_000_000]);
    }

    #[test]
    fn test_pause_long_is_chunked() {
        let mut delay = Recorder::default();
        pause(&mut delay, Duration::from_secs(10));
        assert_eq!(delay.0.len(), 3);
        let total: u64 = delay.0.iter().map(|&ns| ns as u64).sum();
        assert_eq!(total, 10_000_000_000);
    }

    #[test]
    fn test_pause_zero() {
        let mut delay = Recorder::default();
        pause(&mut delay, Duration::ZERO);
        assert!(delay.0.is_empty());
    }
}
