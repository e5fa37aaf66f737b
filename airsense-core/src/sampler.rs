//! Sampler: raw sensor reads to a validated [`Reading`]
//!
//! One call to [`Sampler::sample`] performs one climate read and one ADC
//! read, converts the ADC value through the configured [`LinearScale`], and
//! either returns a fully valid reading or a [`SensorError`]. There are no
//! retries and no state carried between calls.

use core::convert::Infallible;

use crate::config::ReporterConfig;
use crate::errors::{ConfigError, SensorError, SensorResult};
use crate::reading::Reading;
use crate::scale::LinearScale;
use crate::traits::{ClimateSensor, GasSensor, Validatable};
use crate::validators::PlausibilityLimits;

/// Reads both sensors and validates the result
#[derive(Debug)]
pub struct Sampler<C, G> {
    climate: C,
    gas: G,
    scale: LinearScale,
    limits: Option<PlausibilityLimits>,
}

impl<C, G> Sampler<C, G>
where
    C: ClimateSensor,
    G: GasSensor,
{
    /// Sampler with the given gas-sensor mapping and no plausibility limits
    ///
    /// Fails with [`ConfigError::DegenerateScale`] if the mapping cannot
    /// produce finite values, since that would turn every healthy cycle
    /// into a sensor failure.
    pub fn new(climate: C, gas: G, scale: LinearScale) -> Result<Self, ConfigError> {
        scale.validate()?;
        Ok(Self {
            climate,
            gas,
            scale,
            limits: None,
        })
    }

    /// Sampler using the scale and limits of a reporter configuration
    pub fn from_config(climate: C, gas: G, config: &ReporterConfig) -> Result<Self, ConfigError> {
        let sampler = Self::new(climate, gas, config.gas_scale)?;
        match config.plausibility {
            Some(limits) => sampler.with_limits(limits),
            None => Ok(sampler),
        }
    }

    /// Reject readings outside `limits` in addition to NaN reads
    pub fn with_limits(mut self, limits: PlausibilityLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        self.limits = Some(limits);
        Ok(self)
    }

    /// Plausibility limits in use, if any
    pub fn limits(&self) -> Option<&PlausibilityLimits> {
        self.limits.as_ref()
    }

    /// Gas-sensor mapping in use
    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    /// Take one reading
    pub fn sample(&mut self) -> SensorResult<Reading> {
        let climate = match nb::block!(self.climate.read_climate()) {
            Ok(sample) => sample,
            Err(err) => {
                log_warn!("Climate sensor driver error: {:?}", err);
                return Err(SensorError::ReadFailure);
            }
        };

        if !climate.is_valid() {
            log_warn!("Failed to read from climate sensor (non-finite value)");
            return Err(SensorError::ReadFailure);
        }

        if let Some(limits) = &self.limits {
            limits.check(climate.temperature_celsius, climate.relative_humidity_percent)?;
        }

        let raw = match nb::block!(self.gas.read_raw()) {
            Ok(raw) => raw,
            Err(never) => match never {},
        };
        let air_quality = self.scale.apply(raw);
        log_debug!("Gas sensor raw {} -> {}", raw, air_quality);

        Reading::new(
            climate.temperature_celsius,
            climate.relative_humidity_percent,
            air_quality,
        )
        .ok_or(SensorError::ReadFailure)
    }

    /// Give the drivers back
    pub fn into_parts(self) -> (C, G) {
        (self.climate, self.gas)
    }
}

/// Gas channel that always reads the same raw value
///
/// Useful for boards without the gas sensor fitted, and for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedGas(pub u16);

impl GasSensor for FixedGas {
    fn read_raw(&mut self) -> nb::Result<u16, Infallible> {
        Ok(self.0)
    }
}
