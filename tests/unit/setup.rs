//! Unit tests for one-time bring-up and re-calibration

use crate::common::{MockDelay, MockError, Rig};
use balancer::{BalanceConfig, BalanceState, Error};

#[test]
fn test_setup_calibrates_and_starts_fallen() {
    let mut rig = Rig::with_defaults();
    let mut delay = MockDelay::new();
    rig.imu.set_gyro_y(-15);

    rig.balancer.setup(&mut delay).unwrap();

    assert_eq!(rig.imu.init_calls(), 1);
    assert_eq!(rig.balancer.gyro_offset(), -15);
    assert_eq!(rig.balancer.state(), BalanceState::Fallen);
    // 1000 ms settle + 100 samples at 1 ms
    assert_eq!(delay.total_ms(), 1100);
}

#[test]
fn test_setup_retries_init() {
    let mut rig = Rig::with_defaults();
    let mut delay = MockDelay::new();
    rig.imu.set_init_failures(2);

    rig.balancer.setup(&mut delay).unwrap();

    assert_eq!(rig.imu.init_calls(), 3);
    assert_eq!(delay.total_ms(), 2 * 200 + 1100);
}

#[test]
fn test_setup_missing_sensor_is_fatal() {
    let mut rig = Rig::with_defaults();
    let mut delay = MockDelay::new();
    rig.imu.set_absent();

    let result = rig.balancer.setup(&mut delay);

    assert!(matches!(
        result,
        Err(Error::SensorNotDetected(MockError::NotDetected))
    ));
    assert_eq!(rig.imu.init_calls(), 5);
    // No calibration sampling after giving up
    assert_eq!(rig.imu.reads(), 0);
    assert_eq!(delay.total_ms(), 4 * 200);
}

#[test]
fn test_setup_seeds_encoder_baseline() {
    let mut rig = Rig::with_defaults();
    let mut delay = MockDelay::new();
    rig.encoders.set(1234, -4321);

    rig.balancer.setup(&mut delay).unwrap();
    rig.balancer.update_sensors_only();
    rig.clock.advance(10);
    rig.balancer.update_sensors_only();

    assert_eq!(rig.balancer.speed_left(), 0);
    assert_eq!(rig.balancer.distance_left(), 0);
    assert_eq!(rig.balancer.distance_right(), 0);
}

#[test]
fn test_recalibrate_replaces_offset() {
    let mut rig = Rig::with_defaults();
    let mut delay = MockDelay::new();
    rig.imu.set_gyro_y(30);
    rig.balancer.setup(&mut delay).unwrap();
    assert_eq!(rig.balancer.gyro_offset(), 30);

    rig.imu.set_gyro_y(-3);
    assert_eq!(rig.balancer.calibrate(&mut delay).unwrap(), -3);
    assert_eq!(rig.balancer.gyro_offset(), -3);
}

#[test]
fn test_invalid_config_rejected() {
    use crate::common::{MockClock, MockEncoders, MockImu, MockMotors};
    use balancer::{Balancer, ConfigError};

    let config = BalanceConfig::default().with_update_period_ms(0);
    let result = Balancer::new(
        config,
        MockImu::new(),
        MockEncoders::new(),
        MockMotors::new(),
        MockClock::new(),
    );
    assert!(matches!(result, Err(ConfigError::ZeroUpdatePeriod)));
}
