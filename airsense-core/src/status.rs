//! Status sink: where the human-readable state of each cycle goes
//!
//! On the device this is a 128x64 SSD1306 OLED (8 lines of 21 characters at
//! the default font); on a host it is usually the log. The Reporter only
//! ever calls the three `show_*` renderers, which all funnel into
//! [`StatusSink::show_lines`], so an adapter implements one method and
//! inherits the standard screen layout:
//!
//! ```text
//! success cycle            failed read        outcome
//! +---------------------+  +---------------+  +---------------+
//! | Temp: 23.5 C        |  | Sensor Error! |  | Sent OK (200) |
//! | Hum: 60.1 %         |  +---------------+  +---------------+
//! | Air Qual: 12.3      |
//! | Sending...          |
//! +---------------------+
//! ```
//!
//! Lines are fixed-capacity strings. Text past the width is cut at the
//! last character that fits, so a long value still shows its leading digits.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::errors::SensorError;
use crate::outcome::TransmissionOutcome;
use crate::reading::Reading;

/// Characters per display line
pub const LINE_WIDTH: usize = 21;

/// Lines per display frame
pub const MAX_STATUS_LINES: usize = 8;

/// One display line
pub type StatusLine = String<LINE_WIDTH>;

/// One display frame
pub type StatusFrame = Vec<StatusLine, MAX_STATUS_LINES>;

/// Format a single display line, cut at [`LINE_WIDTH`] bytes
pub fn status_line(args: fmt::Arguments<'_>) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = Clipped(&mut line).write_fmt(args);
    line
}

/// Writer that keeps every character that still fits and ignores the rest
struct Clipped<'a>(&'a mut StatusLine);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Receives status lines from the Reporter
pub trait StatusSink {
    /// Replace the current display contents with `lines`, in order
    fn show_lines(&mut self, lines: &[StatusLine]);

    /// Show the splash screen while the device waits for its link
    fn show_boot(&mut self) {
        self.show_lines(&[status_line(format_args!("IoT Sensor Display"))]);
    }

    /// Show the splash screen with the link confirmed
    fn show_link_up(&mut self) {
        self.show_lines(&[
            status_line(format_args!("IoT Sensor Display")),
            status_line(format_args!("WiFi Connected")),
        ]);
    }

    /// Show a freshly sampled reading
    fn show_reading(&mut self, reading: &Reading) {
        let frame: StatusFrame = [
            status_line(format_args!("Temp: {:.1} C", reading.temperature_celsius())),
            status_line(format_args!("Hum: {:.1} %", reading.relative_humidity_percent())),
            status_line(format_args!("Air Qual: {:.1}", reading.air_quality_index())),
            status_line(format_args!("Sending...")),
        ]
        .into_iter()
        .collect();
        self.show_lines(&frame);
    }

    /// Show the outcome of this cycle's transmission
    fn show_outcome(&mut self, outcome: &TransmissionOutcome) {
        self.show_lines(&[status_line(format_args!("{}", outcome))]);
    }

    /// Show that this cycle's sensor read failed
    fn show_sensor_error(&mut self, _error: &SensorError) {
        self.show_lines(&[status_line(format_args!("Sensor Error!"))]);
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn show_lines(&mut self, lines: &[StatusLine]) {
        (**self).show_lines(lines)
    }

    fn show_boot(&mut self) {
        (**self).show_boot()
    }

    fn show_link_up(&mut self) {
        (**self).show_link_up()
    }

    fn show_reading(&mut self, reading: &Reading) {
        (**self).show_reading(reading)
    }

    fn show_outcome(&mut self, outcome: &TransmissionOutcome) {
        (**self).show_outcome(outcome)
    }

    fn show_sensor_error(&mut self, error: &SensorError) {
        (**self).show_sensor_error(error)
    }
}

/// Keeps the most recent frame in memory
///
/// Handy for headless hosts that expose the current status elsewhere, and
/// for tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    current: StatusFrame,
    frames: usize,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of the most recent frame
    pub fn lines(&self) -> &[StatusLine] {
        &self.current
    }

    /// Number of frames shown so far
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl StatusSink for MemorySink {
    fn show_lines(&mut self, lines: &[StatusLine]) {
        self.current = lines.iter().take(MAX_STATUS_LINES).cloned().collect();
        self.frames += 1;
    }
}

/// Writes every status line to the `log` facade at info level
#[cfg(feature = "log")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[cfg(feature = "log")]
impl StatusSink for LogSink {
    fn show_lines(&mut self, lines: &[StatusLine]) {
        for line in lines {
            log::info!(target: "airsense::status", "{}", line);
        }
    }
}
