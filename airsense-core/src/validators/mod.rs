//! Plausibility Limits for Climate Readings
//!
//! ## Overview
//!
//! The Sampler's baseline validation is the one the sensor libraries give
//! us: a failed DHT read comes back as NaN and is rejected. Some deployments
//! want more than that. A DHT22 with a corroded data line can produce a
//! checksum-valid frame reading 3276.7 °C, and such a reading should not reach
//! the server.
//!
//! [`PlausibilityLimits`] adds an optional range check per quantity. It is
//! off by default; when configured, a reading outside the band fails the cycle
//! with [`SensorError::OutOfRange`](crate::SensorError::OutOfRange) exactly
//! like a NaN read would.
//!
//! ## Sensor Ranges
//!
//! | Sensor | Temperature     | Humidity   |
//! |--------|-----------------|------------|
//! | DHT11  | 0 to 50 °C      | 20 to 90 % |
//! | DHT22  | -40 to 80 °C    | 0 to 100 % |
//!
//! ```rust
//! use airsense_core::validators::{PlausibilityLimits, Range};
//!
//! let limits = PlausibilityLimits::DHT22;
//! assert!(limits.check(21.5, 48.0).is_ok());
//! assert!(limits.check(21.5, 140.0).is_err());
//!
//! let greenhouse = PlausibilityLimits {
//!     temperature: Range::new(5.0, 45.0),
//!     humidity: Range::new(30.0, 100.0),
//! };
//! assert!(greenhouse.validate().is_ok());
//! ```

mod utils;

pub use utils::{bounds_are_sane, check_range};

use crate::errors::{ConfigError, SensorResult};

/// Inclusive `[min, max]` band
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Range {
    /// Lowest accepted value
    pub min: f32,
    /// Highest accepted value
    pub max: f32,
}

impl Range {
    /// Create a band from its bounds
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Optional per-quantity limits applied after the NaN check
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlausibilityLimits {
    /// Accepted temperature band in °C
    pub temperature: Range,
    /// Accepted relative humidity band in %
    pub humidity: Range,
}

impl PlausibilityLimits {
    /// DHT11 datasheet operating range
    pub const DHT11: Self = Self {
        temperature: Range::new(0.0, 50.0),
        humidity: Range::new(20.0, 90.0),
    };

    /// DHT22 / AM2302 datasheet operating range
    pub const DHT22: Self = Self {
        temperature: Range::new(-40.0, 80.0),
        humidity: Range::new(0.0, 100.0),
    };

    /// Check a temperature/humidity pair against the limits
    pub fn check(&self, temperature_celsius: f32, humidity_percent: f32) -> SensorResult<()> {
        check_range(
            "temperature",
            temperature_celsius,
            self.temperature.min,
            self.temperature.max,
        )?;
        check_range(
            "humidity",
            humidity_percent,
            self.humidity.min,
            self.humidity.max,
        )
    }

    /// Reject inverted or non-finite bands
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !bounds_are_sane(self.temperature.min, self.temperature.max) {
            return Err(ConfigError::InvalidLimits("temperature"));
        }
        if !bounds_are_sane(self.humidity.min, self.humidity.max) {
            return Err(ConfigError::InvalidLimits("humidity"));
        }
        Ok(())
    }
}
