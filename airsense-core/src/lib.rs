//! Core telemetry loop for AirSense
//!
//! Samples a temperature/humidity sensor and an analog gas sensor, encodes
//! the reading as a fixed-schema JSON body, POSTs it to a configured
//! endpoint and reports what happened to a status display, on a timer,
//! forever.
//!
//! Every collaborator is a trait so the loop runs the same on a
//! microcontroller, on a host, and under test:
//!
//! | Trait | Typical adapter |
//! |-------|-----------------|
//! | [`ClimateSensor`] | DHT11/DHT22 driver |
//! | [`GasSensor`] | MQ-2/MQ-135 on an ADC pin |
//! | [`Transport`] | HTTP client + WiFi status |
//! | [`StatusSink`] | SSD1306 OLED, serial log |
//! | [`Delay`] | HAL timer, `thread::sleep` |
//!
//! Key constraints:
//! - Builds for `no_std` + `alloc`
//! - No state carried between cycles
//! - No runtime error is fatal
//!
//! ```no_run
//! use airsense_core::{LogSink, Reporter, ReporterConfig, StopSignal, ThreadDelay};
//! # use airsense_core::{ClimateSample, ClimateSensor, FixedGas, HttpResponse, Transport};
//! # struct Dht22;
//! # impl ClimateSensor for Dht22 {
//! #     type Error = ();
//! #     fn read_climate(&mut self) -> nb::Result<ClimateSample, ()> { Err(nb::Error::Other(())) }
//! # }
//! # struct Http;
//! # impl Transport for Http {
//! #     fn is_link_up(&self) -> bool { false }
//! #     fn post(&mut self, _: &str, _: &[(&str, &str)], _: &str) -> HttpResponse { HttpResponse::failure(-1) }
//! # }
//! # let (dht22, mq2, http) = (Dht22, FixedGas(0), Http);
//!
//! let config = ReporterConfig::new("http://192.168.1.100:5000/receive_sensor");
//! let mut reporter = Reporter::new(config, dht22, mq2, http, LogSink, ThreadDelay)?;
//!
//! reporter.run(&StopSignal::new());
//! # Ok::<(), airsense_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod errors;
pub mod link;
pub mod outcome;
pub mod payload;
pub mod reading;
pub mod reporter;
pub mod sampler;
pub mod scale;
pub mod signal;
pub mod status;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use config::{PinMapping, ReporterConfig};
pub use errors::{ConfigError, LinkTimeout, SensorError, SensorResult};
pub use link::{boot, wait_for_link};
pub use outcome::TransmissionOutcome;
pub use payload::encode;
pub use reading::Reading;
pub use reporter::{CycleReport, Reporter, ReporterState, ReporterStats};
pub use sampler::{FixedGas, Sampler};
pub use scale::LinearScale;
pub use signal::StopSignal;
pub use status::{MemorySink, StatusLine, StatusSink};
pub use time::{Delay, RecordingDelay};
pub use traits::{ClimateSample, ClimateSensor, GasSensor, HttpResponse, Transport};
pub use validators::{PlausibilityLimits, Range};

#[cfg(feature = "log")]
pub use status::LogSink;

#[cfg(feature = "std")]
pub use time::ThreadDelay;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
