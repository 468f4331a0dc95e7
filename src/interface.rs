// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware collaborators consumed by the controller.
//!
//! The controller owns one implementation of each trait and calls them synchronously from the
//! control loop. Implementations must not block in [`Imu::read`], [`WheelEncoders::counts`],
//! [`MotorDriver::set_speeds`] or [`Clock::now_ms`].

/// Raw three-axis sample in sensor units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// One IMU sample.
///
/// The robot pitches about the gyro Y axis. With the robot upright, gravity lies along accelerometer
/// X and Z points along the direction of travel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuReading {
    pub gyro: Vector3,
    pub accel: Vector3,
}

/// Inertial sensor.
pub trait Imu {
    type Error: core::fmt::Debug;

    /// Detect and configure the sensor. An error means the sensor is absent or unresponsive.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Read the latest sample. `WouldBlock` means no fresh sample is available yet.
    fn read(&mut self) -> nb::Result<ImuReading, Self::Error>;
}

/// Wrapping 16-bit quadrature counters, one per wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderCounts {
    pub left: i16,
    pub right: i16,
}

impl EncoderCounts {
    pub const fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }
}

/// Wheel encoders. Reading must not reset the counters.
pub trait WheelEncoders {
    fn counts(&mut self) -> EncoderCounts;
}

/// Motor driver accepting signed per-wheel speeds.
pub trait MotorDriver {
    fn set_speeds(&mut self, left: i16, right: i16);
}

/// Millisecond counter wrapping at 16 bits.
///
/// Hosts with a wider clock truncate it (`now as u16`); all elapsed-time arithmetic in this crate
/// is wrapping.
pub trait Clock {
    fn now_ms(&mut self) -> u16;
}
