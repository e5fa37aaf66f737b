//! Reporter Loop Example
//!
//! Runs the reporting loop against in-memory collaborators, so the whole
//! cycle can be watched without hardware or a network.
//!
//! ## What You'll Learn
//!
//! - How a cycle turns a reading into a payload and an outcome
//! - How sensor, link and transport failures are reported, not raised
//! - How the sleep after each cycle is chosen
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_reporter_loop
//! ```

use core::cell::Cell;

use airsense_core::{
    ClimateSample, ClimateSensor, CycleReport, FixedGas, HttpResponse, MemorySink,
    RecordingDelay, Reporter, ReporterConfig, Transport,
};

/// Good reading, then a NaN, then good readings again
struct FlakyDht {
    reads: u32,
}

impl ClimateSensor for FlakyDht {
    type Error = ();

    fn read_climate(&mut self) -> nb::Result<ClimateSample, ()> {
        self.reads += 1;
        let temperature = if self.reads == 2 { f32::NAN } else { 21.5 + self.reads as f32 * 0.25 };
        Ok(ClimateSample {
            temperature_celsius: temperature,
            relative_humidity_percent: 48.0,
        })
    }
}

/// Link is down on the third check, the third POST is refused
struct BenchNetwork {
    checks: Cell<u32>,
    posts: u32,
}

impl Transport for BenchNetwork {
    fn is_link_up(&self) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.checks.get() != 3
    }

    fn post(&mut self, url: &str, _headers: &[(&str, &str)], body: &str) -> HttpResponse {
        self.posts += 1;
        println!("  -> POST {} {}", url, body);
        if self.posts == 3 {
            HttpResponse::failure(-1)
        } else {
            HttpResponse::new(200, "{\"status\":\"ok\"}")
        }
    }
}

fn main() -> Result<(), airsense_core::ConfigError> {
    println!("=== AirSense Reporter Loop ===\n");

    let config = ReporterConfig::new("http://192.168.1.100:5000/receive_sensor");
    let network = BenchNetwork {
        checks: Cell::new(0),
        posts: 0,
    };

    let mut reporter = Reporter::new(
        config,
        FlakyDht { reads: 0 },
        FixedGas(1638),
        network,
        MemorySink::new(),
        RecordingDelay::new(),
    )?;

    for cycle in 1..=6 {
        println!("Cycle {}", cycle);
        let report = reporter.step();

        match &report {
            CycleReport::SensorFailed(err) => println!("  sensor: {}", err),
            CycleReport::Completed { outcome, .. } => println!("  outcome: {}", outcome),
        }

        let display: Vec<&str> = reporter.sink().lines().iter().map(|l| l.as_str()).collect();
        println!("  display: {:?}", display);
        println!("  sleep: {:?}\n", reporter.pause_after(&report));
    }

    let stats = reporter.stats();
    println!("=== Statistics ===");
    println!("Cycles:             {}", stats.cycles);
    println!("Delivered:          {}", stats.delivered);
    println!("Sensor failures:    {}", stats.sensor_failures);
    println!("Link unavailable:   {}", stats.link_unavailable);
    println!("Transport failures: {}", stats.transport_failures);
    println!("Time asleep:        {:?}", reporter.delay().total());

    Ok(())
}
