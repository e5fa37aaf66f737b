//! Host-side Adapters for the AirSense Reporter
//!
//! ## Overview
//!
//! `airsense-core` defines the reporting loop over traits and never touches
//! a socket or a file. This crate provides the adapters a Linux gateway or
//! a desktop test rig needs to run that loop for real:
//!
//! - [`http`]: a [`Transport`](airsense_core::Transport) over `ureq`, with
//!   an optional TCP link probe standing in for WiFi association status
//! - [`config`]: loading a [`ReporterConfig`](airsense_core::ReporterConfig)
//!   from a JSON file
//!
//! ## HTTP Transport
//!
//! **When to use:**
//! - The collector speaks plain HTTP/HTTPS (the usual Flask endpoint)
//! - The host has a real network stack
//!
//! **Characteristics:**
//! - One blocking POST per cycle, no retries (the next cycle is the retry)
//! - Transport failures come back as negative status codes, so the
//!   Reporter reports them exactly as it would on the microcontroller
//!
//! ## Example Usage
//!
//! ```no_run
//! use airsense_connectors::{config::load_config, http::{HttpConfig, HttpTransport}};
//! use airsense_core::{LogSink, Reporter, StopSignal, ThreadDelay};
//! # use airsense_core::{ClimateSample, ClimateSensor, FixedGas};
//! # struct Dht22;
//! # impl ClimateSensor for Dht22 {
//! #     type Error = ();
//! #     fn read_climate(&mut self) -> nb::Result<ClimateSample, ()> { Err(nb::Error::Other(())) }
//! # }
//!
//! let config = load_config("airsense.json")?;
//! let transport = HttpTransport::new(
//!     HttpConfig::new()
//!         .timeout_secs(5)
//!         .probe_endpoint(&config.endpoint_url),
//! )?;
//!
//! let mut reporter = Reporter::new(config, Dht22, FixedGas(0), transport, LogSink, ThreadDelay)?;
//! reporter.run(&StopSignal::new());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;

#[cfg(feature = "http")]
pub mod http;

// Re-export common types
pub use config::{load_config, parse_config, ConfigLoadError};

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpError, HttpTransport};

/// Delivery statistics kept by a connector
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Requests that got an HTTP status back
    pub messages_sent: u64,
    /// Requests that failed before a status arrived
    pub messages_failed: u64,
    /// Body bytes handed to the network
    pub bytes_sent: u64,
    /// Last transport error message
    pub last_error: Option<String>,
}
