//! Stop signal for the reporting loop
//!
//! The loop is meant to run forever. A [`StopSignal`] gives tests and hosts
//! a clean way out: it is checked once, at the top of each cycle, so a cycle
//! that has started always runs to the end (including its sleep).

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle to a shared stop flag
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A signal that has not been raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop before its next cycle
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
