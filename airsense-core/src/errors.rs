//! Error Types for Sampling and Configuration
//!
//! ## Design Philosophy
//!
//! Errors here follow the same rules as the rest of the core:
//!
//! 1. **Small Size**: every variant is a handful of bytes, no `String`, only
//!    `&'static str` for labels. Errors are produced once per cycle and may be
//!    logged or displayed, never stored.
//!
//! 2. **Copy Semantics**: errors are `Copy` so the Reporter can hand them to
//!    the status sink and the statistics without cloning.
//!
//! ## Error Categories
//!
//! ### Sensor failures (recoverable, skip the cycle)
//! - `ReadFailure`: the climate sensor returned NaN or a driver error
//! - `OutOfRange`: a reading violated the optional plausibility limits
//!
//! ### Configuration failures (startup only)
//! - `InvalidEndpoint`, `DegenerateScale`, `ZeroInterval`, `InvalidLimits`
//! - `LinkTimeout`: the network never came up while waiting at boot
//!
//! Link and transport failures are not errors in this taxonomy: they are
//! [`TransmissionOutcome`](crate::outcome::TransmissionOutcome) values, since
//! the Reporter reports them rather than propagating them.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use airsense_core::SensorError;
//!
//! fn describe(err: SensorError) -> &'static str {
//!     match err {
//!         SensorError::ReadFailure => "sensor did not answer, try next cycle",
//!         SensorError::OutOfRange { .. } => "implausible value, try next cycle",
//!     }
//! }
//! # assert_eq!(describe(SensorError::ReadFailure), "sensor did not answer, try next cycle");
//! ```

use thiserror_no_std::Error;

/// Result type for sampling operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Errors raised by the [`Sampler`](crate::sampler::Sampler)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Temperature or humidity could not be read (NaN, infinite, or a driver fault)
    #[error("Failed to read from climate sensor")]
    ReadFailure,

    /// A reading fell outside the configured plausibility limits
    #[error("{quantity} {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Which measurement failed ("temperature" or "humidity")
        quantity: &'static str,
        /// The value as read
        value: f32,
        /// Lower plausibility bound
        min: f32,
        /// Upper plausibility bound
        max: f32,
    },
}

/// Configuration rejected when a [`Reporter`](crate::reporter::Reporter) is built
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint must be an absolute http:// or https:// URL
    #[error("Endpoint URL must start with http:// or https://")]
    InvalidEndpoint,

    /// `raw_min == raw_max` makes the gas-sensor mapping divide by zero
    #[error("Gas sensor scale has an empty raw range")]
    DegenerateScale,

    /// A loop interval of zero would spin the loop
    #[error("Interval `{0}` must be at least one second")]
    ZeroInterval(&'static str),

    /// Plausibility limits with `min > max` or non-finite bounds
    #[error("Plausibility limits for {0} are invalid")]
    InvalidLimits(&'static str),
}

/// The link did not come up within the attempt budget at startup
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Link still down after {attempts} attempts")]
pub struct LinkTimeout {
    /// Number of link checks made
    pub attempts: u32,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ReadFailure => defmt::write!(fmt, "Climate sensor read failed"),
            Self::OutOfRange { quantity, value, min, max } =>
                defmt::write!(fmt, "{} {} outside [{}, {}]", quantity, value, min, max),
        }
    }
}
