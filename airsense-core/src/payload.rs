//! Payload encoder
//!
//! The receiving server compares bodies byte for byte, so the encoder writes
//! the JSON by hand instead of going through a serializer: three keys in a
//! fixed order, every value with exactly two fractional digits, no
//! whitespace.
//!
//! ```text
//! {"temperature":23.45,"humidity":60.10,"air_quality":12.30}
//! ```
//!
//! Values are always finite numbers (guaranteed by [`Reading`]), so there is
//! nothing to escape.

use alloc::format;
use alloc::string::String;

use crate::reading::Reading;

/// Content type of the encoded payload
pub const CONTENT_TYPE: &str = "application/json";

/// Headers sent with every POST
pub const JSON_HEADERS: [(&str, &str); 1] = [("Content-Type", CONTENT_TYPE)];

/// Encode a reading into the wire JSON body
pub fn encode(reading: &Reading) -> String {
    format!(
        "{{\"temperature\":{:.2},\"humidity\":{:.2},\"air_quality\":{:.2}}}",
        reading.temperature_celsius(),
        reading.relative_humidity_percent(),
        reading.air_quality_index(),
    )
}
