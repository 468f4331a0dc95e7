//! Common test utilities and mock implementations

#![allow(dead_code)]

pub mod test_utils;

pub use mock_hardware::{MockClock, MockDelay, MockEncoders, MockError, MockImu, MockMotors, MockPin};
pub use test_utils::{accel_at_angle, Rig, ACCEL_1G};
