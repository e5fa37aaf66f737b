//! Reporter configuration
//!
//! One immutable value handed to the [`Reporter`](crate::reporter::Reporter)
//! at construction. Nothing in the crate reads configuration from globals.
//!
//! The defaults reproduce the ESP32 + DHT22 + MQ-2 deployment: DHT data on
//! GPIO15, MQ-2 on ADC pin 34 mapped onto 0-100 %, a report every 10 seconds
//! and a 5 second pause after a failed sensor read.
//!
//! ```rust
//! use airsense_core::{LinearScale, ReporterConfig};
//!
//! let config = ReporterConfig::new("http://192.168.1.105:5000/receive_sensor")
//!     .gas_scale(LinearScale::ADC10_PPM)
//!     .normal_interval_secs(120);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.normal_interval().as_secs(), 120);
//! ```

use alloc::string::String;
use core::time::Duration;

use crate::errors::ConfigError;
use crate::scale::LinearScale;
use crate::validators::PlausibilityLimits;

/// Default normal reporting interval
pub const DEFAULT_NORMAL_INTERVAL_SECS: u32 = 10;

/// Default pause after a failed sensor read
pub const DEFAULT_ERROR_BACKOFF_SECS: u32 = 5;

/// Which pins the sensors hang off
///
/// The core never touches pins; adapters read this when they set up drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMapping {
    /// Data pin of the temperature/humidity sensor
    pub climate_pin: u8,
    /// Analog pin of the gas sensor
    pub gas_pin: u8,
}

impl Default for PinMapping {
    fn default() -> Self {
        Self {
            climate_pin: 15,
            gas_pin: 34,
        }
    }
}

/// Everything the reporting loop needs to know
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReporterConfig {
    /// Absolute URL the payload is POSTed to
    pub endpoint_url: String,
    /// Sensor wiring
    pub pins: PinMapping,
    /// Raw ADC to air-quality mapping
    pub gas_scale: LinearScale,
    /// Optional range check on temperature and humidity
    pub plausibility: Option<PlausibilityLimits>,
    /// Sleep after a completed cycle
    pub normal_interval_seconds: u32,
    /// Sleep after a failed sensor read
    pub error_backoff_seconds: u32,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::from("http://192.168.1.100:5000/receive_sensor"),
            pins: PinMapping::default(),
            gas_scale: LinearScale::ADC12_PERCENT,
            plausibility: None,
            normal_interval_seconds: DEFAULT_NORMAL_INTERVAL_SECS,
            error_backoff_seconds: DEFAULT_ERROR_BACKOFF_SECS,
        }
    }
}

impl ReporterConfig {
    /// Default configuration pointed at `endpoint_url`
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Self::default()
        }
    }

    /// Set the sensor wiring
    pub fn pins(mut self, pins: PinMapping) -> Self {
        self.pins = pins;
        self
    }

    /// Set the gas-sensor mapping
    pub fn gas_scale(mut self, scale: LinearScale) -> Self {
        self.gas_scale = scale;
        self
    }

    /// Enable plausibility limits
    pub fn plausibility(mut self, limits: PlausibilityLimits) -> Self {
        self.plausibility = Some(limits);
        self
    }

    /// Set the normal reporting interval in seconds
    pub fn normal_interval_secs(mut self, secs: u32) -> Self {
        self.normal_interval_seconds = secs;
        self
    }

    /// Set the pause after a failed sensor read in seconds
    pub fn error_backoff_secs(mut self, secs: u32) -> Self {
        self.error_backoff_seconds = secs;
        self
    }

    /// Normal reporting interval
    pub fn normal_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.normal_interval_seconds))
    }

    /// Pause after a failed sensor read
    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(u64::from(self.error_backoff_seconds))
    }

    /// Check the configuration before the loop starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.endpoint_url.as_str();
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or(ConfigError::InvalidEndpoint)?;
        if rest.is_empty() || rest.starts_with('/') || rest.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidEndpoint);
        }

        self.gas_scale.validate()?;

        if let Some(limits) = &self.plausibility {
            limits.validate()?;
        }

        if self.normal_interval_seconds == 0 {
            return Err(ConfigError::ZeroInterval("normal_interval_seconds"));
        }
        if self.error_backoff_seconds == 0 {
            return Err(ConfigError::ZeroInterval("error_backoff_seconds"));
        }

        Ok(())
    }
}
