// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tilt angle estimation from the gyro, with accelerometer re-anchoring at rest.
//!
//! The angle is integrated from the calibrated pitch rate in millidegrees. Gyro drift is bled off
//! by [`AngleEstimator::decay`], which assumes a balancing robot averages zero tilt over time.

use micromath::F32Ext;

use crate::config::Decay;

/// Millidegrees per radian.
const MILLIDEG_PER_RAD: f32 = 57_295.78;

/// Integrated tilt state.
#[derive(Copy, Clone, Debug)]
pub struct AngleEstimator {
    /// Millidegrees from vertical.
    angle: i32,
    /// Degrees per second (equivalently millidegrees per ms).
    angle_rate: i32,
    /// Zero-rate gyro offset in raw units.
    offset: i32,
    /// Raw gyro units per deg/s.
    lsb_per_dps: i32,
}

impl AngleEstimator {
    pub fn new(lsb_per_dps: i32) -> Self {
        Self {
            angle: 0,
            angle_rate: 0,
            offset: 0,
            lsb_per_dps,
        }
    }

    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    #[inline]
    pub fn angle_rate(&self) -> i32 {
        self.angle_rate
    }

    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Replace the zero-rate offset.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    /// Overwrite the angle estimate (millidegrees).
    pub fn set_angle(&mut self, angle: i32) {
        self.angle = angle;
    }

    /// Convert a raw pitch-rate sample and integrate it over `elapsed_ms`.
    pub fn integrate_gyro(&mut self, raw_rate: i16, elapsed_ms: u16) {
        self.angle_rate = (raw_rate as i32 - self.offset) / self.lsb_per_dps;
        self.angle = self
            .angle
            .wrapping_add(self.angle_rate.wrapping_mul(elapsed_ms as i32));
    }

    /// Pull the angle toward zero by one step of `decay`.
    pub fn decay(&mut self, decay: Decay) {
        self.angle = decay.apply(self.angle);
    }

    /// True while `|angle_rate| < threshold`.
    #[inline]
    pub fn is_at_rest(&self, threshold: i32) -> bool {
        self.angle_rate > -threshold && self.angle_rate < threshold
    }

    /// Recompute the angle from gravity if the robot is at rest.
    ///
    /// `ax` is the accelerometer component along the robot's upright axis and `az` the component
    /// along its direction of travel. Returns whether the angle was replaced.
    pub fn reanchor(&mut self, ax: i16, az: i16, rest_threshold: i32) -> bool {
        if !self.is_at_rest(rest_threshold) {
            return false;
        }
        self.angle = accel_angle_millideg(ax, az);
        true
    }
}

/// Tilt implied by the gravity vector, in millidegrees.
///
/// Upright (gravity along X) reads 0°; lying on its front or back reads close to ±90°.
pub fn accel_angle_millideg(ax: i16, az: i16) -> i32 {
    let rad = F32Ext::atan2(az as f32, ax as f32);
    (rad * MILLIDEG_PER_RAD) as i32
}
