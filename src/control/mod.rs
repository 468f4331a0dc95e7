// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! State estimation and the balancing state machine.
//!
//! ## Modules
//!
//! - [`calibration`] - Zero-rate gyro offset from a stationary batch.
//! - [`angle`] - Gyro integration, drift decay, and accelerometer re-anchoring.
//! - [`odometry`] - Wheel distance/speed from encoder counts, with drive-tick injection.
//! - [`debounce`] - Consecutive-tick debounce for state transitions.
//! - [`scheduler`] - Fixed-period tick gate over a wrapping millisecond clock.
//! - [`balancer`] - The balancing controller and its host API.

pub mod angle;
pub mod balancer;
pub mod calibration;
pub mod debounce;
pub mod odometry;
pub mod scheduler;

pub use angle::AngleEstimator;
pub use balancer::{BalanceState, Balancer, Telemetry};
pub use calibration::GyroCalibrator;
pub use debounce::Debounce;
pub use odometry::Odometry;
pub use scheduler::TickScheduler;
