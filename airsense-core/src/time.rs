//! Sleeping between cycles
//!
//! The Reporter never calls `thread::sleep` or a HAL delay directly; it asks
//! a [`Delay`]. That keeps the loop runnable on:
//! - a host (`ThreadDelay`)
//! - a HAL timer (implement [`Delay`] over its blocking delay)
//! - a test, where no real time should pass (`RecordingDelay`)

use alloc::vec::Vec;
use core::time::Duration;

use crate::signal::StopSignal;

/// Blocking delay provider
pub trait Delay {
    /// Block for `duration`
    fn delay(&mut self, duration: Duration);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Delay backed by `std::thread::sleep` (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

#[cfg(feature = "std")]
impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested delays without sleeping
///
/// Optionally raises a [`StopSignal`] once a number of delays have been
/// requested, which lets a test run the full loop for a fixed number of
/// cycles.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    requested: Vec<Duration>,
    stop_after: Option<(usize, StopSignal)>,
}

impl RecordingDelay {
    /// Delay that only records
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `signal` once `count` delays have been requested
    pub fn stop_after(mut self, count: usize, signal: StopSignal) -> Self {
        self.stop_after = Some((count, signal));
        self
    }

    /// Every duration requested so far, in order
    pub fn requested(&self) -> &[Duration] {
        &self.requested
    }

    /// Sum of all requested durations
    pub fn total(&self) -> Duration {
        self.requested.iter().sum()
    }
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) {
        self.requested.push(duration);
        if let Some((count, signal)) = &self.stop_after {
            if self.requested.len() >= *count {
                signal.stop();
            }
        }
    }
}
