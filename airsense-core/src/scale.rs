//! Linear rescaling of raw ADC values
//!
//! Gas sensors like the MQ-2 or MQ-135 expose an analog voltage that is read
//! through an ADC and rescaled onto a sensor-specific "air quality" scale.
//! The mapping is a straight line through two points:
//!
//! ```text
//! out = out_min + (raw - raw_min) * (out_max - out_min) / (raw_max - raw_min)
//! ```
//!
//! Raw values outside `[raw_min, raw_max]` extrapolate along the same line;
//! nothing is clamped.

use crate::errors::ConfigError;

/// Two-point linear mapping from raw ADC counts to an output scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearScale {
    /// Raw value mapped to `out_min`
    pub raw_min: f32,
    /// Raw value mapped to `out_max`
    pub raw_max: f32,
    /// Output at `raw_min`
    pub out_min: f32,
    /// Output at `raw_max`
    pub out_max: f32,
}

impl LinearScale {
    /// 12-bit ADC (ESP32) onto a 0-100 percentage
    pub const ADC12_PERCENT: Self = Self::new(0.0, 4095.0, 0.0, 100.0);

    /// 10-bit ADC (ESP8266 A0) onto 0-5 ppm
    pub const ADC10_PPM: Self = Self::new(0.0, 1024.0, 0.0, 5.0);

    /// Create a mapping from `[raw_min, raw_max]` onto `[out_min, out_max]`
    pub const fn new(raw_min: f32, raw_max: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            raw_min,
            raw_max,
            out_min,
            out_max,
        }
    }

    /// Map a raw ADC value onto the output scale
    #[inline]
    pub fn apply(&self, raw: u16) -> f32 {
        self.apply_f32(raw as f32)
    }

    /// Map an arbitrary raw value onto the output scale
    #[inline]
    pub fn apply_f32(&self, raw: f32) -> f32 {
        let span_raw = self.raw_max - self.raw_min;
        let span_out = self.out_max - self.out_min;
        self.out_min + (raw - self.raw_min) * span_out / span_raw
    }

    /// Reject mappings that cannot produce finite output
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [self.raw_min, self.raw_max, self.out_min, self.out_max];
        if bounds.iter().any(|b| !b.is_finite()) || self.raw_min == self.raw_max {
            return Err(ConfigError::DegenerateScale);
        }
        Ok(())
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::ADC12_PERCENT
    }
}
