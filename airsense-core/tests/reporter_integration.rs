//! Integration tests for the reporting loop
//!
//! Drive the Reporter end to end over fakes: sensor reads in, HTTP calls
//! and status frames out.

mod common;

use std::time::Duration;

use airsense_core::{
    ConfigError, CycleReport, FixedGas, HttpResponse, LinearScale, PlausibilityLimits, RecordingDelay,
    Reporter, ReporterConfig, ReporterState, SensorError, StopSignal, TransmissionOutcome,
};

use common::{reporter, reporter_with, sample, FakeTransport, RecordingSink, ScriptedClimate, ENDPOINT};

#[test]
fn successful_cycle_posts_exact_payload() {
    // 0.123 * 100 = 12.3 on a 0..=1000 raw range
    let config = ReporterConfig::new(ENDPOINT).gas_scale(LinearScale::new(0.0, 1000.0, 0.0, 100.0));
    let mut reporter = reporter_with(
        config,
        ScriptedClimate::constant(23.45, 60.1),
        FixedGas(123),
        FakeTransport::answering(200, "{\"status\":\"ok\"}"),
        RecordingDelay::new(),
    );

    let report = reporter.run_cycle();

    let expected_body = r#"{"temperature":23.45,"humidity":60.10,"air_quality":12.30}"#;
    assert_eq!(report.payload(), Some(expected_body));
    assert_eq!(
        report.outcome(),
        Some(&TransmissionOutcome::Success {
            status_code: 200,
            body: "{\"status\":\"ok\"}".into()
        })
    );

    let posts = &reporter.transport().posts;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, ENDPOINT);
    assert_eq!(posts[0].body, expected_body);
    assert_eq!(
        posts[0].headers,
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );
}

#[test]
fn sink_sees_reading_then_outcome() {
    let mut reporter = reporter(
        ScriptedClimate::constant(23.45, 60.1),
        FixedGas(0),
        FakeTransport::answering(200, "ok"),
    );
    reporter.run_cycle();

    let frames = &reporter.sink().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], ["Temp: 23.5 C", "Hum: 60.1 %", "Air Qual: 0.0", "Sending..."]);
    assert_eq!(frames[1], ["Sent OK (200)"]);
}

#[test]
fn nan_reading_skips_transport_and_backs_off() {
    let mut reporter = reporter(
        ScriptedClimate::constant(f32::NAN, 55.0),
        FixedGas(100),
        FakeTransport::answering(200, "ok"),
    );

    let report = reporter.step();

    assert_eq!(report, CycleReport::SensorFailed(SensorError::ReadFailure));
    assert!(reporter.transport().posts.is_empty());
    assert_eq!(reporter.transport().link_checks.get(), 0);
    assert_eq!(reporter.sink().last(), Some(&["Sensor Error!".to_string()][..]));
    assert_eq!(reporter.delay().requested(), [Duration::from_secs(5)]);
}

#[test]
fn nan_humidity_and_driver_faults_are_read_failures() {
    let mut reporter = reporter(
        ScriptedClimate::new([Some(sample(21.0, f32::NAN)), None, Some(sample(21.0, 40.0))]),
        FixedGas(0),
        FakeTransport::answering(200, "ok"),
    );

    assert!(matches!(reporter.run_cycle(), CycleReport::SensorFailed(SensorError::ReadFailure)));
    assert!(matches!(reporter.run_cycle(), CycleReport::SensorFailed(SensorError::ReadFailure)));
    assert!(matches!(reporter.run_cycle(), CycleReport::Completed { .. }));
    assert_eq!(reporter.transport().posts.len(), 1);
    assert_eq!(reporter.stats().sensor_failures, 2);
}

#[test]
fn link_down_never_posts() {
    let mut reporter = reporter(
        ScriptedClimate::constant(20.0, 50.0),
        FixedGas(0),
        FakeTransport::new([false], [HttpResponse::new(200, "ok")]),
    );

    let report = reporter.step();

    assert_eq!(report.outcome(), Some(&TransmissionOutcome::LinkUnavailable));
    assert!(reporter.transport().posts.is_empty());
    assert_eq!(reporter.sink().last(), Some(&["Link Down".to_string()][..]));
    // link failures sleep the normal interval, not the error backoff
    assert_eq!(reporter.delay().requested(), [Duration::from_secs(10)]);
}

#[test]
fn transport_failure_is_reported_not_retried() {
    let mut reporter = reporter(
        ScriptedClimate::constant(20.0, 50.0),
        FixedGas(0),
        FakeTransport::new([true], [HttpResponse::failure(-1)]),
    );

    let report = reporter.run_cycle();

    assert_eq!(
        report.outcome(),
        Some(&TransmissionOutcome::TransportFailure { status_code: -1 })
    );
    assert_eq!(reporter.transport().posts.len(), 1);
    assert_eq!(reporter.sink().last(), Some(&["Send Failed (-1)".to_string()][..]));
    assert_eq!(reporter.stats().transport_failures, 1);
}

#[test]
fn identical_inputs_give_identical_cycles() {
    let mut reporter = reporter(
        ScriptedClimate::constant(18.2, 71.9),
        FixedGas(2000),
        FakeTransport::answering(201, "created"),
    );

    let first = reporter.run_cycle();
    let second = reporter.run_cycle();

    assert_eq!(first, second);
    let posts = &reporter.transport().posts;
    assert_eq!(posts[0].body.as_bytes(), posts[1].body.as_bytes());
}

#[test]
fn repeated_failures_repeat_outcomes() {
    let mut reporter = reporter(
        ScriptedClimate::constant(18.0, 40.0),
        FixedGas(0),
        FakeTransport::new([true], [HttpResponse::failure(-11)]),
    );

    let outcomes: Vec<_> = (0..3)
        .map(|_| reporter.run_cycle().outcome().cloned())
        .collect();
    assert!(outcomes
        .iter()
        .all(|o| *o == Some(TransmissionOutcome::TransportFailure { status_code: -11 })));
}

#[test]
fn sink_always_shows_latest_cycle() {
    let mut reporter = reporter(
        ScriptedClimate::constant(20.0, 50.0),
        FixedGas(0),
        FakeTransport::new([true, false, true], [HttpResponse::new(200, "ok")]),
    );

    reporter.run_cycle();
    assert_eq!(reporter.sink().last(), Some(&["Sent OK (200)".to_string()][..]));
    reporter.run_cycle();
    assert_eq!(reporter.sink().last(), Some(&["Link Down".to_string()][..]));
    reporter.run_cycle();
    assert_eq!(reporter.sink().last(), Some(&["Sent OK (200)".to_string()][..]));
}

#[test]
fn run_until_stopped() {
    let stop = StopSignal::new();
    let config = ReporterConfig::new(ENDPOINT).normal_interval_secs(120);
    let mut reporter = reporter_with(
        config,
        ScriptedClimate::new([Some(sample(20.0, 50.0)), None, Some(sample(20.0, 50.0))]),
        FixedGas(0),
        FakeTransport::answering(200, "ok"),
        RecordingDelay::new().stop_after(3, stop.clone()),
    );

    let stats = reporter.run(&stop);

    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.sensor_failures, 1);
    assert_eq!(
        reporter.delay().requested(),
        [Duration::from_secs(120), Duration::from_secs(5), Duration::from_secs(120)]
    );
    assert_eq!(reporter.state(), ReporterState::Idle);
}

#[test]
fn stop_during_cycle_finishes_that_cycle() {
    let stop = StopSignal::new();
    let mut reporter = reporter_with(
        ReporterConfig::new(ENDPOINT),
        ScriptedClimate::constant(20.0, 50.0),
        FixedGas(0),
        FakeTransport::answering(200, "ok"),
        // raised during the first sleep, i.e. after the POST
        RecordingDelay::new().stop_after(1, stop.clone()),
    );

    let stats = reporter.run(&stop);

    assert_eq!(stats.cycles, 1);
    assert_eq!(reporter.transport().posts.len(), 1);
    assert_eq!(reporter.sink().frames.len(), 2);
    assert_eq!(reporter.delay().requested().len(), 1);
}

#[test]
fn plausibility_limits_from_config() {
    let config = ReporterConfig::new(ENDPOINT).plausibility(PlausibilityLimits::DHT11);
    let mut reporter = reporter_with(
        config,
        ScriptedClimate::constant(-12.0, 50.0),
        FixedGas(0),
        FakeTransport::answering(200, "ok"),
        RecordingDelay::new(),
    );

    let report = reporter.run_cycle();

    assert!(matches!(
        report,
        CycleReport::SensorFailed(SensorError::OutOfRange { quantity: "temperature", .. })
    ));
    assert!(reporter.transport().posts.is_empty());
}

#[test]
fn gas_scale_comes_from_validated_config() {
    let degenerate = ReporterConfig::new(ENDPOINT).gas_scale(LinearScale::new(5.0, 5.0, 0.0, 1.0));
    let result = Reporter::new(
        degenerate,
        ScriptedClimate::constant(21.0, 40.0),
        FixedGas(5),
        FakeTransport::answering(200, "ok"),
        RecordingSink::default(),
        RecordingDelay::new(),
    );
    assert!(matches!(result, Err(ConfigError::DegenerateScale)));

    let config = ReporterConfig::new(ENDPOINT).gas_scale(LinearScale::ADC10_PPM);
    let mut reporter = reporter_with(
        config,
        ScriptedClimate::constant(21.0, 40.0),
        FixedGas(512),
        FakeTransport::answering(200, "ok"),
        RecordingDelay::new(),
    );

    let report = reporter.run_cycle();
    assert!(matches!(report, CycleReport::Completed { .. }));
    assert_eq!(reporter.sampler().scale(), &LinearScale::ADC10_PPM);
    assert_eq!(
        report.payload(),
        Some(r#"{"temperature":21.00,"humidity":40.00,"air_quality":2.50}"#)
    );
}
