//! Shared range checks
//!
//! Pure functions, no allocation. Used by [`PlausibilityLimits`](super::PlausibilityLimits)
//! and available to drivers that want the same error shape.

use crate::errors::{SensorError, SensorResult};
use crate::traits::Validatable;

/// Check if a value is within the specified range
pub fn check_range(quantity: &'static str, value: f32, min: f32, max: f32) -> SensorResult<()> {
    if value < min || value > max {
        Err(SensorError::OutOfRange {
            quantity,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Check that both bounds are usable numbers with `min <= max`
pub fn bounds_are_sane(min: f32, max: f32) -> bool {
    min.is_valid() && max.is_valid() && min <= max
}
