//! Host Reporter with Simulated Sensors
//!
//! Runs the full reporting loop on a desktop against a real collector,
//! with a drifting fake DHT22 and MQ-2 standing in for the hardware.
//!
//! ## What You'll Learn
//!
//! - Loading a `ReporterConfig` from JSON
//! - Wiring `HttpTransport` with a link probe
//! - Writing your own `ClimateSensor`, `GasSensor` and `StatusSink`
//!
//! ## Running the Example
//!
//! ```bash
//! # against the collector named in airsense.json, 5 cycles
//! RUST_LOG=info cargo run -p airsense-connectors --example host_reporter -- airsense.json 5
//! ```
//!
//! Without a config path the default endpoint
//! `http://192.168.1.100:5000/receive_sensor` is used.

use std::convert::Infallible;
use std::time::Duration;

use airsense_connectors::{
    http::{HttpConfig, HttpTransport},
    load_config,
};
use airsense_core::{
    boot, ClimateSample, ClimateSensor, Delay, GasSensor, Reporter, ReporterConfig,
    StatusLine, StatusSink, StopSignal, ThreadDelay,
};

/// DHT22 stand-in: slow drift, a dropped read every seventh call
struct DriftingDht {
    tick: u32,
}

impl ClimateSensor for DriftingDht {
    type Error = &'static str;

    fn read_climate(&mut self) -> nb::Result<ClimateSample, Self::Error> {
        self.tick += 1;
        if self.tick % 7 == 0 {
            return Err(nb::Error::Other("checksum mismatch"));
        }
        let phase = (self.tick % 20) as f32;
        Ok(ClimateSample {
            temperature_celsius: 22.0 + phase * 0.15,
            relative_humidity_percent: 55.0 - phase * 0.4,
        })
    }
}

/// MQ-2 stand-in on a 12-bit ADC
struct RampingMq2 {
    raw: u16,
}

impl GasSensor for RampingMq2 {
    fn read_raw(&mut self) -> nb::Result<u16, Infallible> {
        self.raw = (self.raw + 97) % 4096;
        Ok(self.raw)
    }
}

/// Prints each frame the way the OLED would show it
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn show_lines(&mut self, lines: &[StatusLine]) {
        println!("+---------------------+");
        for line in lines {
            println!("|{:<21}|", line.as_str());
        }
        println!("+---------------------+");
    }
}

/// Sleeps for real, raising `stop` after `cycles` sleeps
struct CountedDelay {
    remaining: u32,
    stop: StopSignal,
}

impl Delay for CountedDelay {
    fn delay(&mut self, duration: Duration) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop.stop();
            return;
        }
        ThreadDelay.delay(duration);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(path)?,
        None => ReporterConfig::default(),
    };
    let cycles: u32 = args.next().map(|n| n.parse::<u32>()).transpose()?.unwrap_or(5);

    println!("=== AirSense host reporter ===");
    println!("Endpoint: {}", config.endpoint_url);
    println!(
        "Pins: climate {}, gas {}",
        config.pins.climate_pin, config.pins.gas_pin
    );

    let transport = HttpTransport::new(
        HttpConfig::new()
            .timeout_secs(5)
            .probe_endpoint(&config.endpoint_url),
    )?;

    // Same as the boot-time WiFi wait, but bounded
    let mut sink = ConsoleSink;
    match boot(&transport, &mut sink, &mut ThreadDelay, Duration::from_millis(500), Some(10)) {
        Ok(checks) => println!("Link up after {} checks", checks),
        Err(e) => println!("{}; reporting anyway", e),
    }

    let stop = StopSignal::new();
    let delay = CountedDelay {
        remaining: cycles,
        stop: stop.clone(),
    };

    let mut reporter = Reporter::new(
        config,
        DriftingDht { tick: 0 },
        RampingMq2 { raw: 0 },
        transport,
        sink,
        delay,
    )?;
    let stats = reporter.run(&stop);

    println!("\n=== Summary ===");
    println!("Cycles:             {}", stats.cycles);
    println!("Delivered:          {}", stats.delivered);
    println!("Sensor failures:    {}", stats.sensor_failures);
    println!("Link unavailable:   {}", stats.link_unavailable);
    println!("Transport failures: {}", stats.transport_failures);

    let (_, transport, _, _) = reporter.into_parts();
    println!("Bytes sent:         {}", transport.stats().bytes_sent);
    Ok(())
}
