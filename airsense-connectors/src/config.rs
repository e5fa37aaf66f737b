//! Loading the Reporter configuration from a JSON file
//!
//! The file mirrors [`ReporterConfig`] field for field. Missing fields take
//! the defaults, so the smallest useful file names only the endpoint:
//!
//! ```json
//! { "endpoint_url": "http://192.168.1.100:5000/receive_sensor" }
//! ```
//!
//! A fuller one:
//!
//! ```json
//! {
//!   "endpoint_url": "http://192.168.1.105:5000/receive_sensor",
//!   "pins": { "climate_pin": 4, "gas_pin": 36 },
//!   "gas_scale": { "raw_min": 0, "raw_max": 1024, "out_min": 0, "out_max": 5 },
//!   "plausibility": {
//!     "temperature": { "min": -40, "max": 80 },
//!     "humidity": { "min": 0, "max": 100 }
//!   },
//!   "normal_interval_seconds": 120,
//!   "error_backoff_seconds": 5
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use airsense_core::{ConfigError, ReporterConfig};
use log::info;
use thiserror::Error;

/// Why a configuration file could not be used
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON or does not match the schema
    #[error("Cannot parse {path}: {source}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but describes an unusable configuration
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Parse a configuration from JSON text without validating it
pub fn parse_config(json: &str) -> Result<ReporterConfig, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read, parse and validate the configuration at `path`
pub fn load_config(path: impl AsRef<Path>) -> Result<ReporterConfig, ConfigLoadError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
