//! Unit tests for the BALANCING/FALLEN state machine and its hysteresis

use crate::common::{accel_at_angle, Rig};
use balancer::{BalanceConfig, BalanceState};

/// Config where one raw gyro unit is 1 deg/s, so a single tick can move the angle far
fn coarse_gyro_config() -> BalanceConfig {
    let mut config = BalanceConfig::default();
    config.gyro_lsb_per_dps = 1;
    config
}

#[test]
fn test_starts_fallen() {
    let rig = Rig::with_defaults();
    assert!(!rig.balancer.is_balancing());
    assert_eq!(rig.balancer.state(), BalanceState::Fallen);
}

#[test]
fn test_start_requires_more_than_dwell_ticks() {
    let mut rig = Rig::with_defaults();

    for _ in 0..5 {
        rig.tick();
        assert!(!rig.balancer.is_balancing());
    }
    rig.tick();
    assert!(rig.balancer.is_balancing());
}

#[test]
fn test_interrupted_start_does_not_flip() {
    let mut rig = Rig::with_defaults();

    // dwell - 1 qualifying ticks, then one outside the start band
    rig.ticks(4);
    rig.imu.set_accel(accel_at_angle(50.0));
    rig.tick();
    assert!(!rig.balancer.is_balancing());

    rig.imu.set_accel(accel_at_angle(0.0));
    rig.ticks(5);
    assert!(!rig.balancer.is_balancing());
    rig.tick();
    assert!(rig.balancer.is_balancing());
}

#[test]
fn test_held_outside_start_band_never_balances() {
    let mut rig = Rig::with_defaults();
    rig.imu.set_accel(accel_at_angle(50.0));

    for _ in 0..20 {
        rig.tick();
        assert!(!rig.balancer.is_balancing());
        assert!((rig.balancer.angle() - 50_000).abs() < 300);
    }
    assert_eq!(rig.motors.last(), Some((0, 0)));
}

#[test]
fn test_between_thresholds_keeps_state() {
    let mut rig = Rig::with_defaults();

    // 60 degrees: outside the start band but inside the stop band
    rig.imu.set_accel(accel_at_angle(60.0));
    rig.ticks(20);
    assert!(!rig.balancer.is_balancing());
}

#[test]
fn test_single_tilted_sample_does_not_fall() {
    let mut rig = Rig::new(coarse_gyro_config());
    rig.bring_up();

    // One tick swings the angle past the stop threshold, the next swings it back
    rig.imu.set_gyro_sequence(&[7500, -7500]);
    rig.tick();
    assert!(rig.balancer.angle() > 70_000);
    rig.tick();
    assert!(rig.balancer.angle().abs() < 1_000);

    rig.ticks(10);
    assert!(rig.balancer.is_balancing());
}

#[test]
fn test_fall_requires_more_than_dwell_ticks() {
    let mut rig = Rig::new(coarse_gyro_config());
    rig.bring_up();

    // Jump past the stop angle and stay there (decay alone takes far longer to bring it back)
    rig.imu.set_gyro_sequence(&[7500]);
    for _ in 0..5 {
        rig.tick();
        assert!(rig.balancer.is_balancing());
    }
    rig.tick();
    assert!(!rig.balancer.is_balancing());
}

#[test]
fn test_fall_resets_motion_state() {
    let mut rig = Rig::new(coarse_gyro_config());
    rig.bring_up();

    // Build up some distance and motor speed while balancing
    for _ in 0..3 {
        rig.encoders.advance(30, 10);
        rig.tick();
    }
    assert_ne!(rig.balancer.distance_left(), 0);
    assert_ne!(rig.balancer.motor_speed(), 0);

    rig.imu.set_gyro_sequence(&[7500]);
    while rig.balancer.is_balancing() {
        rig.encoders.advance(30, 10);
        rig.tick();
    }

    assert_eq!(rig.balancer.distance_left(), 0);
    assert_eq!(rig.balancer.distance_right(), 0);
    assert_eq!(rig.balancer.motor_speed(), 0);
    assert_eq!(rig.motors.last(), Some((0, 0)));
}

#[test]
fn test_fallen_reanchors_only_when_still() {
    let mut rig = Rig::new(coarse_gyro_config());
    rig.imu.set_accel(accel_at_angle(-80.0));

    // Moving: the gyro integrates, the accelerometer is ignored
    rig.imu.set_gyro_y(100);
    rig.tick();
    assert_eq!(rig.balancer.angle(), 1_000);

    // Still: the accelerometer takes over
    rig.imu.set_gyro_y(1);
    rig.tick();
    assert!((rig.balancer.angle() + 80_000).abs() < 300);
}

#[test]
fn test_recovers_after_fall() {
    let mut rig = Rig::new(coarse_gyro_config());
    rig.bring_up();

    rig.imu.set_gyro_sequence(&[7500]);
    rig.ticks(6);
    assert!(!rig.balancer.is_balancing());

    // Picked back up: still and upright again
    rig.imu.set_accel(accel_at_angle(0.0));
    rig.ticks(6);
    assert!(rig.balancer.is_balancing());
}

#[test]
fn test_max_dwell_still_transitions() {
    let config = BalanceConfig::default().with_thresholds(45_000, 70_000, u8::MAX);
    assert_eq!(config.validate(), Ok(()));
    let mut rig = Rig::new(config);

    rig.ticks(255);
    assert!(!rig.balancer.is_balancing());
    rig.tick();
    assert!(rig.balancer.is_balancing());
}
