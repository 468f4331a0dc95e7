// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Left/right motor command output.
//!
//! Turns the common-mode motor speed into a pair of wheel commands. The left/right distance
//! mismatch is fed back differentially so the robot does not rotate as it rocks, and so commanded
//! turns are tracked.

use crate::interface::MotorDriver;

/// Clamp `speed` to `±limit`.
#[inline]
pub fn clamp_speed(speed: i32, limit: i16) -> i16 {
    let limit = limit as i32;
    speed.clamp(-limit, limit) as i16
}

/// Differential split, clamping and direction flips ahead of a [`MotorDriver`].
#[derive(Copy, Clone, Debug)]
pub struct MotorOutput {
    /// Gain on `distance_left - distance_right`, in percent.
    diff_response: i32,
    /// Per-wheel range accepted by the driver.
    driver_limit: i16,
    flip_left: bool,
    flip_right: bool,
    last: (i16, i16),
}

impl MotorOutput {
    pub fn new(diff_response: i32, driver_limit: i16) -> Self {
        Self {
            diff_response,
            driver_limit,
            flip_left: false,
            flip_right: false,
            last: (0, 0),
        }
    }

    /// Change the per-wheel clamp.
    pub fn set_driver_limit(&mut self, driver_limit: i16) {
        self.driver_limit = driver_limit;
    }

    /// Invert the left motor, for a motor wired the other way round.
    pub fn flip_left(&mut self, flip: bool) {
        self.flip_left = flip;
    }

    /// Invert the right motor.
    pub fn flip_right(&mut self, flip: bool) {
        self.flip_right = flip;
    }

    /// Per-wheel commands for `motor_speed` given the current left/right distance difference.
    pub fn split(&self, motor_speed: i16, distance_diff: i32) -> (i16, i16) {
        let correction = (distance_diff as i64 * self.diff_response as i64 / 100)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let common = motor_speed as i32;

        (
            clamp_speed(common.saturating_add(correction), self.driver_limit),
            clamp_speed(common.saturating_sub(correction), self.driver_limit),
        )
    }

    /// Split, then forward to the driver. Returns the logical (unflipped) commands.
    pub fn command<M: MotorDriver>(
        &mut self,
        driver: &mut M,
        motor_speed: i16,
        distance_diff: i32,
    ) -> (i16, i16) {
        let (left, right) = self.split(motor_speed, distance_diff);
        self.send(driver, left, right);
        (left, right)
    }

    /// Command both motors to zero.
    pub fn stop<M: MotorDriver>(&mut self, driver: &mut M) {
        self.send(driver, 0, 0);
    }

    /// Last logical commands sent.
    #[inline]
    pub fn last(&self) -> (i16, i16) {
        self.last
    }

    fn send<M: MotorDriver>(&mut self, driver: &mut M, left: i16, right: i16) {
        self.last = (left, right);
        let left = if self.flip_left { -left } else { left };
        let right = if self.flip_right { -right } else { right };
        driver.set_speeds(left, right);
    }
}
