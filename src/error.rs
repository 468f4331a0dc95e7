// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types.
//!
//! Errors only surface from setup and calibration. The per-tick path absorbs degraded conditions
//! into controller state instead.

/// Rejected configuration values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroUpdatePeriod,
    ZeroGearRatio,
    /// Speed limit or driver limit is zero or negative
    NonPositiveSpeedLimit,
    ZeroCalibrationSamples,
    ZeroGyroScale,
    /// Decay ratio is not in `[0, 1]` or has a non-positive denominator
    InvalidDecay,
    ZeroInitAttempts,
    /// The stop angle must be strictly larger than the start angle
    NoHysteresis,
}

/// Controller errors, generic over the IMU's error type.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// IMU communication failed while sampling
    Imu(E),
    /// IMU could not be initialized after every configured attempt (holds the last error)
    SensorNotDetected(E),
    /// Invalid configuration parameter
    InvalidConfig(ConfigError),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(error: ConfigError) -> Self {
        Self::InvalidConfig(error)
    }
}
