// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tuning constants for the balancing controller.
//!
//! The defaults were tuned on a Balboa 32U4 with 50:1 motors and 45:21 plastic gears (overall gear
//! ratio 111) and 80 mm wheels. Other builds should start from [`BalanceConfig::default`] and adjust
//! with the `with_*` builders.

use crate::error::ConfigError;

/// Sign convention used when folding commanded drive ticks into the odometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveTickPolicy {
    /// `distance -= drive`, `speed -= drive`. The controller sees the robot as lagging behind the
    /// commanded trajectory and rolls forward to catch up.
    Subtract,
    /// `distance += drive`, `speed += drive`.
    Add,
}

impl DriveTickPolicy {
    /// Signed contribution of a drive command to one tick of odometry.
    #[inline]
    pub fn offset(self, drive: i32) -> i32 {
        match self {
            DriveTickPolicy::Subtract => drive.wrapping_neg(),
            DriveTickPolicy::Add => drive,
        }
    }
}

/// Fixed-point ratio applied to the angle once per balancing tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decay {
    pub numerator: i32,
    pub denominator: i32,
}

impl Decay {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Scale `value` by `numerator / denominator`, truncating toward zero.
    #[inline]
    pub fn apply(self, value: i32) -> i32 {
        (value as i64 * self.numerator as i64 / self.denominator as i64) as i32
    }
}

/// Complete controller configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BalanceConfig {
    /// Relates wheel/motor ticks to robot geometry; divides the correction increment.
    pub gear_ratio: i32,
    /// Common-mode motor speed clamp.
    pub motor_speed_limit: i16,
    /// Doubles [`motor_speed_limit`](Self::motor_speed_limit) when set.
    pub turbo: bool,
    /// Per-wheel command clamp. Turbo widens it to [`speed_limit`](Self::speed_limit) when that is
    /// larger.
    pub driver_limit: i16,

    /// Millidegrees of angle per deg/s of angle rate for a robot rising to (or falling from)
    /// vertical. About 140 for 80 mm wheels.
    pub angle_rate_ratio: i32,
    /// Response to the combined angle + rate term.
    pub angle_response: i32,
    /// Response to distance travelled. Positive: the robot rolls backwards to fall forwards.
    pub distance_response: i32,
    /// Response to the left/right distance difference, in percent. Negative.
    pub distance_diff_response: i32,
    /// Damping of the oscillations caused by `distance_response`.
    pub speed_response: i32,

    /// Nominal control period in ms. The gains above assume 10 ms.
    pub update_period_ms: u16,

    pub calibration_samples: u16,
    pub calibration_delay_ms: u32,
    /// Wait after IMU init before sampling, so readings stabilize.
    pub settle_time_ms: u32,
    pub init_attempts: u8,
    pub init_retry_delay_ms: u32,

    /// Start balancing when closer to vertical than this (millidegrees).
    pub start_balancing_angle: i32,
    /// Give up when farther from vertical than this (millidegrees).
    pub stop_balancing_angle: i32,
    /// A transition needs its condition on more than this many consecutive ticks.
    pub dwell_ticks: u8,

    /// Raw gyro units per deg/s. 29 at the 1000 deg/s full scale.
    pub gyro_lsb_per_dps: i32,
    pub drift_decay: Decay,
    /// The robot is at rest while `|angle_rate|` is below this (deg/s).
    pub rest_rate_threshold: i32,

    pub drive_policy: DriveTickPolicy,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            gear_ratio: 111,
            motor_speed_limit: 300,
            turbo: false,
            driver_limit: 400,

            angle_rate_ratio: 140,
            angle_response: 11,
            distance_response: 73,
            distance_diff_response: -50,
            speed_response: 3300,

            update_period_ms: 10,

            calibration_samples: 100,
            calibration_delay_ms: 1,
            settle_time_ms: 1000,
            init_attempts: 5,
            init_retry_delay_ms: 200,

            start_balancing_angle: 45_000,
            stop_balancing_angle: 70_000,
            dwell_ticks: 5,

            gyro_lsb_per_dps: 29,
            drift_decay: Decay::new(999, 1000),
            rest_rate_threshold: 2,

            drive_policy: DriveTickPolicy::Subtract,
        }
    }
}

impl BalanceConfig {
    /// Set the gear ratio.
    pub fn with_gear_ratio(mut self, gear_ratio: i32) -> Self {
        self.gear_ratio = gear_ratio;
        self
    }

    /// Set the common-mode speed limit and turbo flag.
    pub fn with_speed_limit(mut self, limit: i16, turbo: bool) -> Self {
        self.motor_speed_limit = limit;
        self.turbo = turbo;
        self
    }

    /// Set the four balancing gains.
    pub fn with_responses(
        mut self,
        angle: i32,
        distance: i32,
        distance_diff: i32,
        speed: i32,
    ) -> Self {
        self.angle_response = angle;
        self.distance_response = distance;
        self.distance_diff_response = distance_diff;
        self.speed_response = speed;
        self
    }

    /// Set start/stop thresholds (millidegrees) and the dwell count.
    pub fn with_thresholds(mut self, start: i32, stop: i32, dwell_ticks: u8) -> Self {
        self.start_balancing_angle = start;
        self.stop_balancing_angle = stop;
        self.dwell_ticks = dwell_ticks;
        self
    }

    /// Set the nominal control period.
    pub fn with_update_period_ms(mut self, period_ms: u16) -> Self {
        self.update_period_ms = period_ms;
        self
    }

    /// Set the calibration batch size and inter-sample delay.
    pub fn with_calibration(mut self, samples: u16, delay_ms: u32) -> Self {
        self.calibration_samples = samples;
        self.calibration_delay_ms = delay_ms;
        self
    }

    pub fn with_drive_policy(mut self, policy: DriveTickPolicy) -> Self {
        self.drive_policy = policy;
        self
    }

    /// Effective common-mode limit, doubled in turbo mode.
    #[inline]
    pub fn speed_limit(&self) -> i16 {
        if self.turbo {
            self.motor_speed_limit.saturating_mul(2)
        } else {
            self.motor_speed_limit
        }
    }

    /// Per-wheel clamp applied after the differential split. Never below the common-mode limit, so
    /// turbo reaches the wheels.
    #[inline]
    pub fn wheel_limit(&self) -> i16 {
        self.driver_limit.max(self.speed_limit())
    }

    /// Check the configuration for values the control law cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_period_ms == 0 {
            return Err(ConfigError::ZeroUpdatePeriod);
        }
        if self.gear_ratio == 0 {
            return Err(ConfigError::ZeroGearRatio);
        }
        if self.motor_speed_limit <= 0 || self.driver_limit <= 0 {
            return Err(ConfigError::NonPositiveSpeedLimit);
        }
        if self.calibration_samples == 0 {
            return Err(ConfigError::ZeroCalibrationSamples);
        }
        if self.gyro_lsb_per_dps == 0 {
            return Err(ConfigError::ZeroGyroScale);
        }
        let decay = self.drift_decay;
        if decay.denominator <= 0 || decay.numerator < 0 || decay.numerator > decay.denominator {
            return Err(ConfigError::InvalidDecay);
        }
        if self.init_attempts == 0 {
            return Err(ConfigError::ZeroInitAttempts);
        }
        if self.start_balancing_angle < 0 || self.stop_balancing_angle <= self.start_balancing_angle
        {
            return Err(ConfigError::NoHysteresis);
        }
        Ok(())
    }
}
