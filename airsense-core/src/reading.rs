//! Validated sensor reading
//!
//! A [`Reading`] is the only value that crosses the Sampler boundary. It can
//! only be built from finite numbers, so everything downstream (encoder,
//! display, transport) can format it without checking.

use crate::traits::Validatable;

/// One validated set of measurements for a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    temperature_celsius: f32,
    relative_humidity_percent: f32,
    air_quality_index: f32,
}

impl Reading {
    /// Build a reading, or `None` if any field is NaN or infinite
    pub fn new(
        temperature_celsius: f32,
        relative_humidity_percent: f32,
        air_quality_index: f32,
    ) -> Option<Self> {
        let all_valid = temperature_celsius.is_valid()
            && relative_humidity_percent.is_valid()
            && air_quality_index.is_valid();

        all_valid.then_some(Self {
            temperature_celsius,
            relative_humidity_percent,
            air_quality_index,
        })
    }

    /// Temperature in °C
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature_celsius
    }

    /// Relative humidity in %
    pub fn relative_humidity_percent(&self) -> f32 {
        self.relative_humidity_percent
    }

    /// Gas-sensor value on the configured scale
    pub fn air_quality_index(&self) -> f32 {
        self.air_quality_index
    }
}
