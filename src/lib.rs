// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Balancer
//!
//! Balance-control core for a two-wheeled self-balancing robot, written in Rust for `no_std`
//! targets.
//!
//! Each 10 ms tick the controller fuses the gyro, accelerometer and wheel encoders into a tilt
//! angle and wheel odometry, decides whether the robot is balancing or has fallen, and drives the
//! wheel motors to keep it upright while following a commanded drive rate.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Tuning constants and validation |
//! | [`interface`] | Traits for the IMU, encoders, motor driver and clock |
//! | [`control`] | Calibration, angle estimation, odometry, and the balancing state machine |
//! | [`motors`] | Left/right motor command output |
//! | [`hw`] | Fault signalling, plus STM32F7 timer adapters behind the `stm32` feature |
//!
//! ## Getting Started
//!
//! ```ignore
//! let mut balancer = Balancer::new(BalanceConfig::default(), imu, encoders, motors, clock)?;
//! balancer.setup(&mut delay)?;
//!
//! loop {
//!     balancer.update();
//! }
//! ```
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Enable `defmt` for logging and `stm32` for the timer-backed encoder/clock adapters.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod config;
pub mod control;
pub mod error;
pub mod hw;
pub mod interface;
pub mod motors;

pub use config::{BalanceConfig, Decay, DriveTickPolicy};
pub use control::{BalanceState, Balancer, Telemetry};
pub use error::{ConfigError, Error};
pub use interface::{Clock, EncoderCounts, Imu, ImuReading, MotorDriver, Vector3, WheelEncoders};
