use std::time::Duration;

use hortisync_api::models::{OperatingMode, SensorSnapshot, Valve};
use hortisync_control::{Greenhouse, LiveDeviceSource, MutationOutcome, SourceError};

fn reading(temperature: f64, soil_moisture: f64) -> SensorSnapshot {
    SensorSnapshot {
        temperature,
        soil_moisture,
        wind_speed: 4.0,
        ..SensorSnapshot::default()
    }
}

#[test]
fn test_live_device_drives_automatic_mode() {
    let (feed, mut source) = LiveDeviceSource::channel();
    let mut greenhouse = Greenhouse::default();
    greenhouse.set_mode(OperatingMode::Automatic);

    assert_eq!(greenhouse.tick(&mut source), Err(SourceError::NoReading));

    feed.push(reading(29.0, 50.0)).unwrap();
    greenhouse.tick(&mut source).unwrap();
    assert!(greenhouse.actuators().valve1);
    assert!(greenhouse.actuators().valve2);
    assert_eq!(greenhouse.actuators().fan_speed, 80);

    // Back inside the band: valves hold, fan falls back to its default.
    feed.push(reading(24.5, 50.0)).unwrap();
    greenhouse.tick(&mut source).unwrap();
    assert!(greenhouse.actuators().valve1);
    assert!(greenhouse.actuators().valve2);
    assert_eq!(greenhouse.actuators().fan_speed, 45);

    feed.push(reading(19.0, 20.0)).unwrap();
    greenhouse.tick(&mut source).unwrap();
    assert!(greenhouse.actuators().valve1);
    assert!(!greenhouse.actuators().valve2);
    assert_eq!(greenhouse.actuators().fan_speed, 20);
}

#[test]
fn test_live_reading_keeps_device_timestamp() {
    let (feed, mut source) = LiveDeviceSource::channel();
    let mut greenhouse = Greenhouse::default();

    let mut sample = reading(23.0, 50.0);
    sample.taken_at += Duration::from_secs(1_700_000_000);
    let stamped = sample.taken_at;

    feed.push(sample).unwrap();
    greenhouse.tick(&mut source).unwrap();

    assert_eq!(greenhouse.snapshot().taken_at, stamped);
}

#[test]
fn test_manual_toggle_after_leaving_automatic_mode() {
    let (feed, mut source) = LiveDeviceSource::channel();
    let mut greenhouse = Greenhouse::default();
    greenhouse.set_mode(OperatingMode::Automatic);

    feed.push(reading(30.0, 50.0)).unwrap();
    greenhouse.tick(&mut source).unwrap();
    assert_eq!(greenhouse.toggle_valve(Valve::Primary), MutationOutcome::IgnoredInAutoMode);

    greenhouse.set_mode(OperatingMode::Manual);
    let frozen = *greenhouse.actuators();

    assert_eq!(greenhouse.toggle_valve(Valve::Primary), MutationOutcome::Applied);
    assert_eq!(greenhouse.actuators().valve1, !frozen.valve1);
    assert_eq!(greenhouse.actuators().valve2, frozen.valve2);
    assert_eq!(greenhouse.actuators().fan_speed, frozen.fan_speed);

    let mut control = greenhouse.manual().unwrap();
    control.set_fan_speed(130);
    assert_eq!(greenhouse.actuators().fan_speed, 100);
}
