//! Core traits for the collaborators the Reporter drives
//!
//! These traits are the seams between the telemetry loop and the hardware
//! or network it runs against. Keep them simple - an adapter for a DHT22 on
//! a GPIO pin or for an HTTP client should be a few lines.
//!
//! Sensor drivers follow the `nb` convention: a call may return
//! `nb::Error::WouldBlock` while a conversion is still in flight. The
//! [`Sampler`](crate::sampler::Sampler) spins on them with `nb::block!`, so
//! today every read is blocking, but a driver written this way can be reused
//! unchanged by a future non-blocking loop.

use alloc::string::String;
use core::convert::Infallible;
use core::fmt::Debug;

/// Raw output of a temperature/humidity sensor
///
/// Values are exactly what the driver produced and may be NaN (the usual
/// DHT-library signal for a failed read).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    /// Temperature in degrees Celsius
    pub temperature_celsius: f32,
    /// Relative humidity in percent
    pub relative_humidity_percent: f32,
}

/// Temperature/humidity sensor driver (DHT11, DHT22, ...)
pub trait ClimateSensor {
    /// Driver-level fault (checksum mismatch, bus timeout, ...)
    type Error: Debug;

    /// Read one temperature/humidity pair
    fn read_climate(&mut self) -> nb::Result<ClimateSample, Self::Error>;
}

/// Analog gas sensor channel (MQ-2, MQ-135, ...)
///
/// The channel has no failure signal: an ADC read always yields a value.
pub trait GasSensor {
    /// Read the raw ADC value
    fn read_raw(&mut self) -> nb::Result<u16, Infallible>;
}

/// What an HTTP transport returned for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status, or a value `<= 0` for a transport-level failure
    pub status_code: i32,
    /// Response body (empty on transport failure)
    pub body: String,
}

impl HttpResponse {
    /// Response carrying an HTTP status and body
    pub fn new(status_code: i32, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Transport-level failure with the given (non-positive) code
    pub fn failure(code: i32) -> Self {
        Self {
            status_code: code,
            body: String::new(),
        }
    }
}

/// Blocking HTTP transport with a link indicator
///
/// Timeouts are the transport's business; `post` must always return.
pub trait Transport {
    /// Whether the underlying network association is up
    fn is_link_up(&self) -> bool;

    /// POST `body` to `url` with the given headers
    fn post(&mut self, url: &str, headers: &[(&str, &str)], body: &str) -> HttpResponse;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is physically valid (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for ClimateSample {
    fn is_valid(&self) -> bool {
        self.temperature_celsius.is_valid() && self.relative_humidity_percent.is_valid()
    }
}
