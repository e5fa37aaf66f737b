//! The reporting loop
//!
//! ## Cycle
//!
//! ```text
//!   Idle ──► sample ──► show reading ──► encode ──► link up? ──► POST ──► classify
//!    ▲         │ fail                                  │ no                   │
//!    │         ▼                                       ▼                      ▼
//!    │   "Sensor Error!"                        LinkUnavailable ───────► show outcome
//!    │         │                                                              │
//!    └── sleep error_backoff ◄┘                          sleep normal_interval ◄┘
//! ```
//!
//! Every failure is a value consumed inside the cycle: the sink shows it,
//! the log records it, the statistics count it, and the loop carries on.
//! Nothing from one cycle influences the next.
//!
//! ## States
//!
//! Two states, [`ReporterState::Idle`] between cycles and
//! [`ReporterState::Cycling`] while sampling and sending. The loop is
//! strictly sequential, so cycles cannot overlap and no lock is needed.
//!
//! ## Stopping
//!
//! [`Reporter::run`] checks its [`StopSignal`] at the top of every cycle. A
//! stop raised mid-cycle (or during the sleep) takes effect before the next
//! cycle starts; an in-flight sensor read or POST is never interrupted.
//!
//! ## Example
//!
//! ```rust
//! use airsense_core::{
//!     ClimateSample, ClimateSensor, FixedGas, HttpResponse, MemorySink, RecordingDelay,
//!     Reporter, ReporterConfig, StopSignal, Transport,
//! };
//!
//! struct Dht22;
//! impl ClimateSensor for Dht22 {
//!     type Error = ();
//!     fn read_climate(&mut self) -> nb::Result<ClimateSample, ()> {
//!         Ok(ClimateSample { temperature_celsius: 21.0, relative_humidity_percent: 40.0 })
//!     }
//! }
//!
//! struct Loopback;
//! impl Transport for Loopback {
//!     fn is_link_up(&self) -> bool { true }
//!     fn post(&mut self, _url: &str, _headers: &[(&str, &str)], _body: &str) -> HttpResponse {
//!         HttpResponse::new(200, "ok")
//!     }
//! }
//!
//! let config = ReporterConfig::new("http://127.0.0.1:5000/receive_sensor");
//! let stop = StopSignal::new();
//! let delay = RecordingDelay::new().stop_after(3, stop.clone());
//!
//! let mut reporter = Reporter::new(config, Dht22, FixedGas(2048), Loopback, MemorySink::new(), delay)?;
//! let stats = reporter.run(&stop);
//! assert_eq!(stats.cycles, 3);
//! assert_eq!(stats.delivered, 3);
//! # Ok::<(), airsense_core::ConfigError>(())
//! ```

use alloc::string::String;
use core::time::Duration;

use crate::config::ReporterConfig;
use crate::errors::{ConfigError, SensorError};
use crate::outcome::TransmissionOutcome;
use crate::payload::{self, JSON_HEADERS};
use crate::reading::Reading;
use crate::sampler::Sampler;
use crate::signal::StopSignal;
use crate::status::StatusSink;
use crate::time::Delay;
use crate::traits::{ClimateSensor, GasSensor, Transport};

/// Where the loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReporterState {
    /// Between cycles (including the sleep)
    Idle,
    /// Sampling and sending
    Cycling,
}

/// What one cycle produced
#[derive(Debug, Clone, PartialEq)]
pub enum CycleReport {
    /// The sensor read failed; nothing was sent
    SensorFailed(SensorError),
    /// A reading was taken and a transmission outcome recorded
    Completed {
        /// The reading that was taken
        reading: Reading,
        /// The body built from it
        payload: String,
        /// What happened to the body
        outcome: TransmissionOutcome,
    },
}

impl CycleReport {
    /// Transmission outcome, if the cycle got that far
    pub fn outcome(&self) -> Option<&TransmissionOutcome> {
        match self {
            Self::Completed { outcome, .. } => Some(outcome),
            Self::SensorFailed(_) => None,
        }
    }

    /// Encoded payload, if the cycle got that far
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Completed { payload, .. } => Some(payload.as_str()),
            Self::SensorFailed(_) => None,
        }
    }
}

/// Counters over the lifetime of a [`Reporter`]
///
/// Purely observational: nothing in the loop reads them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReporterStats {
    /// Cycles started
    pub cycles: u64,
    /// Cycles skipped because the sensor read failed
    pub sensor_failures: u64,
    /// Cycles where the link was down at send time
    pub link_unavailable: u64,
    /// Payloads that got an HTTP status back
    pub delivered: u64,
    /// POSTs that failed at the transport level
    pub transport_failures: u64,
}

impl ReporterStats {
    fn record(&mut self, outcome: &TransmissionOutcome) {
        match outcome {
            TransmissionOutcome::Success { .. } => self.delivered += 1,
            TransmissionOutcome::TransportFailure { .. } => self.transport_failures += 1,
            TransmissionOutcome::LinkUnavailable => self.link_unavailable += 1,
        }
    }
}

/// Drives sample → encode → transmit → report → sleep
pub struct Reporter<C, G, T, S, D> {
    config: ReporterConfig,
    sampler: Sampler<C, G>,
    transport: T,
    sink: S,
    delay: D,
    state: ReporterState,
    stats: ReporterStats,
}

impl<C, G, T, S, D> Reporter<C, G, T, S, D>
where
    C: ClimateSensor,
    G: GasSensor,
    T: Transport,
    S: StatusSink,
    D: Delay,
{
    /// Validate `config` and assemble the loop
    ///
    /// The sampler is built here from `config`, so the gas scale and
    /// plausibility limits in use are always the validated ones.
    pub fn new(
        config: ReporterConfig,
        climate: C,
        gas: G,
        transport: T,
        sink: S,
        delay: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = Sampler::from_config(climate, gas, &config)?;

        Ok(Self {
            config,
            sampler,
            transport,
            sink,
            delay,
            state: ReporterState::Idle,
            stats: ReporterStats::default(),
        })
    }

    /// Run one cycle without the trailing sleep
    pub fn run_cycle(&mut self) -> CycleReport {
        self.state = ReporterState::Cycling;
        self.stats.cycles += 1;

        let report = match self.sampler.sample() {
            Err(err) => {
                log_warn!("{}", err);
                self.sink.show_sensor_error(&err);
                self.stats.sensor_failures += 1;
                CycleReport::SensorFailed(err)
            }
            Ok(reading) => {
                log_info!("=== Sensor Data ===");
                log_info!(
                    "Temperature: {:.2} C | Humidity: {:.2} % | Air quality: {:.2}",
                    reading.temperature_celsius(),
                    reading.relative_humidity_percent(),
                    reading.air_quality_index()
                );
                self.sink.show_reading(&reading);

                let payload = payload::encode(&reading);
                let outcome = self.transmit(&payload);

                self.sink.show_outcome(&outcome);
                self.stats.record(&outcome);

                CycleReport::Completed {
                    reading,
                    payload,
                    outcome,
                }
            }
        };

        self.state = ReporterState::Idle;
        report
    }

    /// Run one cycle and sleep for the interval it calls for
    pub fn step(&mut self) -> CycleReport {
        let report = self.run_cycle();
        let pause = self.pause_after(&report);
        log_debug!("Sleeping {:?}", pause);
        self.delay.delay(pause);
        report
    }

    /// Cycle until `stop` is raised, then return the statistics
    pub fn run(&mut self, stop: &StopSignal) -> ReporterStats {
        log_info!("Reporting to {}", self.config.endpoint_url);
        while !stop.is_stopped() {
            self.step();
        }
        log_info!("Reporter stopped after {} cycles", self.stats.cycles);
        self.stats
    }

    /// Sleep that follows a cycle: error backoff after a failed read, the
    /// normal interval otherwise
    pub fn pause_after(&self, report: &CycleReport) -> Duration {
        match report {
            CycleReport::SensorFailed(_) => self.config.error_backoff(),
            CycleReport::Completed { .. } => self.config.normal_interval(),
        }
    }

    fn transmit(&mut self, payload: &str) -> TransmissionOutcome {
        if !self.transport.is_link_up() {
            log_warn!("Link unavailable, skipping send");
            return TransmissionOutcome::LinkUnavailable;
        }

        log_debug!("-> POST {} {}", self.config.endpoint_url, payload);
        let response = self
            .transport
            .post(&self.config.endpoint_url, &JSON_HEADERS, payload);
        log_info!("Response code: {}", response.status_code);

        let outcome = TransmissionOutcome::classify(response);
        match &outcome {
            TransmissionOutcome::Success { body, .. } => {
                log_info!("Server response: {}", body);
            }
            _ => {
                log_warn!("Failed to send data");
            }
        }
        outcome
    }

    /// Current state
    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// Counters so far
    pub fn stats(&self) -> ReporterStats {
        self.stats
    }

    /// The configuration the loop was built with
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// The sampler built from the configuration
    pub fn sampler(&self) -> &Sampler<C, G> {
        &self.sampler
    }

    /// The status sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (Sampler<C, G>, T, S, D) {
        (self.sampler, self.transport, self.sink, self.delay)
    }
}
