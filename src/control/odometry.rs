// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-wheel distance and speed from incremental encoder counts.
//!
//! Distance accumulates in encoder ticks and wraps silently on overflow. Speed is the raw
//! tick-to-tick delta, not an average.

use crate::config::DriveTickPolicy;
use crate::interface::EncoderCounts;

#[derive(Copy, Clone, Debug, Default)]
pub struct Odometry {
    last: EncoderCounts,

    distance_left: i32,
    distance_right: i32,
    speed_left: i32,
    speed_right: i32,

    /// Commanded ticks per update, consumed by [`apply_drive_ticks`](Self::apply_drive_ticks).
    drive_left: i32,
    drive_right: i32,
}

impl Odometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `counts` as the reference without producing any motion.
    pub fn set_baseline(&mut self, counts: EncoderCounts) {
        self.last = counts;
    }

    /// Fold in a new encoder reading.
    pub fn update(&mut self, counts: EncoderCounts) {
        // 16-bit wrap: the delta is correct as long as a wheel moves less than half the counter
        // range between reads.
        let delta_left = counts.left.wrapping_sub(self.last.left) as i32;
        let delta_right = counts.right.wrapping_sub(self.last.right) as i32;

        self.speed_left = delta_left;
        self.speed_right = delta_right;
        self.distance_left = self.distance_left.wrapping_add(delta_left);
        self.distance_right = self.distance_right.wrapping_add(delta_right);

        self.last = counts;
    }

    /// Set the commanded tick rate applied on every control tick.
    pub fn drive(&mut self, left: i16, right: i16) {
        self.drive_left = left as i32;
        self.drive_right = right as i32;
    }

    /// Offset distance and speed by the commanded drive so that intentional motion does not read
    /// as a balance error.
    pub fn apply_drive_ticks(&mut self, policy: DriveTickPolicy) {
        let left = policy.offset(self.drive_left);
        let right = policy.offset(self.drive_right);

        self.distance_left = self.distance_left.wrapping_add(left);
        self.distance_right = self.distance_right.wrapping_add(right);
        self.speed_left = self.speed_left.wrapping_add(left);
        self.speed_right = self.speed_right.wrapping_add(right);
    }

    /// Zero both distance accumulators. Speeds and the encoder baseline are untouched.
    pub fn reset_distances(&mut self) {
        self.distance_left = 0;
        self.distance_right = 0;
    }

    #[inline]
    pub fn distance_left(&self) -> i32 {
        self.distance_left
    }

    #[inline]
    pub fn distance_right(&self) -> i32 {
        self.distance_right
    }

    #[inline]
    pub fn speed_left(&self) -> i32 {
        self.speed_left
    }

    #[inline]
    pub fn speed_right(&self) -> i32 {
        self.speed_right
    }

    /// `distance_left + distance_right`
    #[inline]
    pub fn distance_sum(&self) -> i32 {
        self.distance_left.wrapping_add(self.distance_right)
    }

    /// `distance_left - distance_right`
    #[inline]
    pub fn distance_diff(&self) -> i32 {
        self.distance_left.wrapping_sub(self.distance_right)
    }

    /// `speed_left + speed_right`
    #[inline]
    pub fn speed_sum(&self) -> i32 {
        self.speed_left.wrapping_add(self.speed_right)
    }

    #[inline]
    pub fn drive_command(&self) -> (i32, i32) {
        (self.drive_left, self.drive_right)
    }
}
