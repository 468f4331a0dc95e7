// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Static zero-rate gyro calibration.
//!
//! The robot must be stationary while sampling; no motion check is performed.

use embedded_hal::delay::DelayNs;

use crate::error::{ConfigError, Error};
use crate::interface::Imu;

/// Averages a batch of pitch-rate samples into a zero-rate offset.
#[derive(Copy, Clone, Debug)]
pub struct GyroCalibrator {
    samples: u16,
    delay_ms: u32,
}

impl GyroCalibrator {
    pub fn new(samples: u16, delay_ms: u32) -> Self {
        Self { samples, delay_ms }
    }

    /// Take `samples` readings, `delay_ms` apart, and return their mean pitch rate in raw units.
    ///
    /// Blocks on each read until the IMU produces a sample.
    pub fn calibrate<I, D>(&self, imu: &mut I, delay: &mut D) -> Result<i32, Error<I::Error>>
    where
        I: Imu,
        D: DelayNs,
    {
        if self.samples == 0 {
            return Err(Error::InvalidConfig(ConfigError::ZeroCalibrationSamples));
        }

        let mut total: i64 = 0;
        for _ in 0..self.samples {
            let reading = nb::block!(imu.read()).map_err(Error::Imu)?;
            total += reading.gyro.y as i64;
            delay.delay_ms(self.delay_ms);
        }

        let offset = (total / self.samples as i64) as i32;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Gyro calibrated: offset={} over {} samples",
            offset,
            self.samples
        );

        Ok(offset)
    }
}
