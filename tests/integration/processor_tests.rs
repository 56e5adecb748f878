//! ReadingProcessor against a scripted sensor: the full fetch → confidence
//! → AQI path, including retries and data-shape failures.

use std::time::Duration;

use aqimon::app::events::AppEvent;
use aqimon::confidence::ConfidenceFlag;
use aqimon::config::MonitorConfig;
use aqimon::error::{FetchError, FetchFailure, PermanentError, TransientError};
use aqimon::reading::{Endpoint, RawPayload, ReadingProcessor};

use crate::mocks::{refused, FakeClock, Recorder, ScriptedSensor};

fn processor() -> ReadingProcessor {
    ReadingProcessor::new(MonitorConfig::default().retry_policy())
}

#[test]
fn clean_channels_produce_a_good_reading() {
    let mut sensor = ScriptedSensor::steady((10.0, 10.0), (20.0, 20.0));
    let mut clock = FakeClock::new();
    clock.set_ms(7_000);
    let mut sink = Recorder::default();

    let reading = processor()
        .process(&mut sensor, &mut clock, &mut sink)
        .unwrap();

    assert!(reading.valid);
    assert_eq!(reading.aqi_average, 42);
    assert_eq!(reading.aqi_live, 68);
    assert_eq!(reading.average_confidence, ConfidenceFlag::Good);
    assert_eq!(reading.live_confidence, ConfidenceFlag::Good);
    assert_eq!(reading.category().label(), "Good");
    assert_eq!(reading.timestamp_ms, 7_000);
    assert!(sink.events().is_empty());
    assert_eq!((sensor.average_calls, sensor.live_calls), (1, 1));
}

#[test]
fn disagreeing_channels_are_flagged() {
    let mut sensor = ScriptedSensor::steady((10.0, 20.0), (3.0, 3.5));
    let mut sink = Recorder::default();

    let reading = processor()
        .process(&mut sensor, &mut FakeClock::new(), &mut sink)
        .unwrap();

    assert_eq!(reading.average_confidence, ConfidenceFlag::Low);
    assert_eq!(reading.live_confidence, ConfidenceFlag::Good);
    // Channel mean 15.0 still converts.
    assert_eq!(reading.aqi_average, 57);
    assert_eq!(
        sink.events(),
        vec![AppEvent::LowConfidence {
            endpoint: Endpoint::Average,
            a: 10.0,
            b: 20.0,
        }]
    );
}

#[test]
fn transient_failures_are_retried_with_linear_backoff() {
    let mut sensor = ScriptedSensor::new(
        vec![refused(), refused(), Ok(RawPayload::new(10.0, 10.0))],
        vec![Ok(RawPayload::new(10.0, 10.0))],
    );
    let mut clock = FakeClock::new();
    let mut sink = Recorder::default();

    let reading = processor()
        .process(&mut sensor, &mut clock, &mut sink)
        .unwrap();

    assert_eq!(reading.aqi_average, 42);
    assert_eq!(sensor.average_calls, 3);
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(2), Duration::from_secs(4)]
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::AttemptFailed { operation: "average", .. })),
        2
    );
    // Stamped after the waits.
    assert_eq!(reading.timestamp_ms, 6_000);
}

#[test]
fn unreachable_sensor_exhausts_on_the_first_endpoint() {
    let mut sensor = ScriptedSensor::unreachable();
    let mut clock = FakeClock::new();
    let mut sink = Recorder::default();

    let err = processor()
        .process(&mut sensor, &mut clock, &mut sink)
        .unwrap_err();

    assert_eq!(err.endpoint, Endpoint::Average);
    assert!(err.is_retry_exhausted());
    assert!(!err.is_data_shape());
    assert_eq!(sensor.average_calls, 5);
    assert_eq!(sensor.live_calls, 0);
    // 2 + 4 + 6 + 8 seconds, nothing after the last attempt.
    assert_eq!(clock.sleeps().iter().sum::<Duration>(), Duration::from_secs(20));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::RetryExhausted { .. })),
        1
    );
}

#[test]
fn missing_field_is_a_data_shape_error_without_retries() {
    let mut sensor = ScriptedSensor::new(
        vec![Ok(RawPayload::new(5.0, 5.0))],
        vec![Ok(RawPayload {
            pm2_5_atm: Some(5.0),
            pm2_5_atm_b: None,
        })],
    );
    let mut clock = FakeClock::new();

    let err = processor()
        .process(&mut sensor, &mut clock, &mut Recorder::default())
        .unwrap_err();

    assert_eq!(err.endpoint, Endpoint::Live);
    assert!(err.is_data_shape());
    assert_eq!(
        err.failure,
        FetchFailure::Permanent(PermanentError::MissingField("pm2_5_atm_b"))
    );
    assert_eq!(sensor.live_calls, 1);
    assert!(clock.sleeps().is_empty());
}

#[test]
fn malformed_body_from_client_is_not_retried() {
    let mut sensor = ScriptedSensor::new(
        vec![Err(FetchError::Permanent(PermanentError::MalformedPayload))],
        vec![refused()],
    );
    let mut sink = Recorder::default();

    let err = processor()
        .process(&mut sensor, &mut FakeClock::new(), &mut sink)
        .unwrap_err();

    assert!(err.is_data_shape());
    assert_eq!(sensor.average_calls, 1);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::PermanentFailure { operation: "average", .. })),
        1
    );
}

#[test]
fn bad_status_then_recovery() {
    let mut sensor = ScriptedSensor::new(
        vec![Ok(RawPayload::new(1.0, 1.0))],
        vec![
            Err(FetchError::Transient(TransientError::BadStatus(503))),
            Ok(RawPayload::new(1.0, 1.0)),
        ],
    );

    let reading = processor()
        .process(&mut sensor, &mut FakeClock::new(), &mut Recorder::default())
        .unwrap();

    assert_eq!(sensor.live_calls, 2);
    assert_eq!(reading.aqi_live, 4);
}

#[test]
fn negative_concentrations_read_as_zero() {
    let mut sensor = ScriptedSensor::steady((-3.0, -1.0), (0.0, 0.0));

    let reading = processor()
        .process(&mut sensor, &mut FakeClock::new(), &mut Recorder::default())
        .unwrap();

    assert_eq!(reading.aqi_average, 0);
    assert_eq!(reading.aqi_live, 0);
}
