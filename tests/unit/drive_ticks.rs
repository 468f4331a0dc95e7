//! Unit tests for commanded drive ticks and encoder bookkeeping

use crate::common::Rig;
use balancer::{BalanceConfig, DriveTickPolicy};

#[test]
fn test_sensors_only_ignores_drive_command() {
    let mut rig = Rig::with_defaults();

    rig.balancer.drive(50, 50);
    rig.clock.advance(10);
    assert!(rig.balancer.update_sensors_only());

    assert_eq!(rig.balancer.distance_left(), 0);
    assert_eq!(rig.balancer.speed_left(), 0);
    assert_eq!(rig.balancer.distance_right(), 0);
    assert_eq!(rig.balancer.speed_right(), 0);
}

#[test]
fn test_sensors_only_leaves_motors_alone() {
    let mut rig = Rig::with_defaults();
    rig.bring_up();
    let sent = rig.motors.commands();

    rig.encoders.advance(7, -3);
    rig.clock.advance(10);
    assert!(rig.balancer.update_sensors_only());

    assert_eq!(rig.motors.commands(), sent);
    assert_eq!(rig.balancer.speed_left(), 7);
    assert_eq!(rig.balancer.speed_right(), -3);
    assert!(rig.balancer.is_balancing());
}

#[test]
fn test_drive_subtracts_from_odometry() {
    let mut rig = Rig::with_defaults();
    rig.bring_up();
    rig.balancer.reset_encoders();

    rig.balancer.drive(50, 50);
    rig.tick();

    // Wheels did not move: the robot reads as 50 ticks behind its commanded position
    assert_eq!(rig.balancer.distance_left(), -50);
    assert_eq!(rig.balancer.distance_right(), -50);
    assert_eq!(rig.balancer.speed_left(), -50);
    assert_eq!(rig.balancer.speed_right(), -50);
}

#[test]
fn test_drive_is_transparent_when_wheels_follow() {
    let mut rig = Rig::with_defaults();
    rig.bring_up();
    rig.balancer.reset_encoders();

    rig.balancer.drive(20, 20);
    for _ in 0..10 {
        rig.encoders.advance(20, 20);
        rig.tick();
        assert_eq!(rig.balancer.distance_left(), 0);
        assert_eq!(rig.balancer.speed_left(), 0);
    }
}

#[test]
fn test_drive_add_policy() {
    let config = BalanceConfig::default().with_drive_policy(DriveTickPolicy::Add);
    let mut rig = Rig::new(config);
    rig.bring_up();
    rig.balancer.reset_encoders();

    rig.balancer.drive(30, -30);
    rig.tick();

    assert_eq!(rig.balancer.distance_left(), 30);
    assert_eq!(rig.balancer.distance_right(), -30);
}

#[test]
fn test_reset_encoders_keeps_speed_and_angle() {
    let mut rig = Rig::with_defaults();
    rig.bring_up();

    rig.encoders.advance(15, 25);
    rig.tick();
    let angle = rig.balancer.angle();

    rig.balancer.reset_encoders();
    assert_eq!(rig.balancer.distance_left(), 0);
    assert_eq!(rig.balancer.distance_right(), 0);
    assert_eq!(rig.balancer.speed_left(), 15);
    assert_eq!(rig.balancer.speed_right(), 25);
    assert_eq!(rig.balancer.angle(), angle);
}

#[test]
fn test_encoder_wrap_reads_as_small_motion() {
    let mut rig = Rig::with_defaults();
    rig.encoders.set(i16::MAX - 1, i16::MIN + 1);
    rig.clock.advance(10);
    rig.balancer.update_sensors_only();
    rig.balancer.reset_encoders();

    rig.encoders.advance(4, -4);
    rig.clock.advance(10);
    rig.balancer.update_sensors_only();

    assert_eq!(rig.balancer.distance_left(), 4);
    assert_eq!(rig.balancer.distance_right(), -4);
}

#[test]
fn test_fallen_clears_distance_but_not_drive_speed() {
    let mut rig = Rig::with_defaults();

    rig.balancer.drive(50, 50);
    rig.tick();

    assert!(!rig.balancer.is_balancing());
    assert_eq!(rig.balancer.distance_left(), 0);
    assert_eq!(rig.balancer.speed_left(), -50);
}
