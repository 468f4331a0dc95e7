// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! Motor-level wrappers that sit between the controller and a [`MotorDriver`].
//!
//! ## Modules
//!
//! - [`output`] - Common-mode clamp, left/right differential split, direction flips.
//!
//! [`MotorDriver`]: crate::interface::MotorDriver

pub mod output;

pub use output::{clamp_speed, MotorOutput};
