//! Shared fakes for integration tests
//!
//! Each fake stands in for one collaborator of the Reporter and records
//! what it was asked to do, so tests can assert on calls rather than on
//! real hardware or network effects.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use airsense_core::{
    ClimateSample, ClimateSensor, FixedGas, HttpResponse, RecordingDelay, Reporter,
    ReporterConfig, StatusLine, StatusSink, Transport,
};

pub const ENDPOINT: &str = "http://192.168.1.100:5000/receive_sensor";

/// Climate sensor that replays a script, repeating the last entry forever
///
/// `None` entries behave like a driver fault (checksum/timeout).
pub struct ScriptedClimate {
    script: VecDeque<Option<ClimateSample>>,
    pub reads: usize,
}

impl ScriptedClimate {
    pub fn new(script: impl IntoIterator<Item = Option<ClimateSample>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reads: 0,
        }
    }

    pub fn constant(temperature: f32, humidity: f32) -> Self {
        Self::new([Some(sample(temperature, humidity))])
    }
}

impl ClimateSensor for ScriptedClimate {
    type Error = &'static str;

    fn read_climate(&mut self) -> nb::Result<ClimateSample, Self::Error> {
        self.reads += 1;
        let next = next_in(&mut self.script).flatten();
        next.ok_or(nb::Error::Other("checksum mismatch"))
    }
}

pub fn sample(temperature: f32, humidity: f32) -> ClimateSample {
    ClimateSample {
        temperature_celsius: temperature,
        relative_humidity_percent: humidity,
    }
}

/// One recorded POST
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Transport with scripted link states and responses
///
/// Both scripts repeat their last entry once exhausted.
pub struct FakeTransport {
    link: RefCell<VecDeque<bool>>,
    responses: VecDeque<HttpResponse>,
    pub link_checks: Cell<usize>,
    pub posts: Vec<Post>,
}

impl FakeTransport {
    pub fn new(link: impl IntoIterator<Item = bool>, responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self {
            link: RefCell::new(link.into_iter().collect()),
            responses: responses.into_iter().collect(),
            link_checks: Cell::new(0),
            posts: Vec::new(),
        }
    }

    /// Link always up, every POST answered with `status`/`body`
    pub fn answering(status: i32, body: &str) -> Self {
        Self::new([true], [HttpResponse::new(status, body)])
    }
}

/// Pop the head of a script, keeping the last entry forever
fn next_in<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

impl Transport for FakeTransport {
    fn is_link_up(&self) -> bool {
        self.link_checks.set(self.link_checks.get() + 1);
        let mut link = self.link.borrow_mut();
        next_in(&mut *link).unwrap_or(true)
    }

    fn post(&mut self, url: &str, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        self.posts.push(Post {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        });
        next_in(&mut self.responses).unwrap_or_else(|| HttpResponse::failure(-1))
    }
}

/// Keeps every frame ever shown
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<String>>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&[String]> {
        self.frames.last().map(|f| f.as_slice())
    }
}

impl StatusSink for RecordingSink {
    fn show_lines(&mut self, lines: &[StatusLine]) {
        self.frames
            .push(lines.iter().map(|l| l.as_str().to_string()).collect());
    }
}

pub type TestReporter = Reporter<ScriptedClimate, FixedGas, FakeTransport, RecordingSink, RecordingDelay>;

/// Reporter over fakes with the default configuration
pub fn reporter(climate: ScriptedClimate, gas: FixedGas, transport: FakeTransport) -> TestReporter {
    reporter_with(ReporterConfig::new(ENDPOINT), climate, gas, transport, RecordingDelay::new())
}

pub fn reporter_with(
    config: ReporterConfig,
    climate: ScriptedClimate,
    gas: FixedGas,
    transport: FakeTransport,
    delay: RecordingDelay,
) -> TestReporter {
    Reporter::new(config, climate, gas, transport, RecordingSink::default(), delay)
        .expect("test configuration is valid")
}
